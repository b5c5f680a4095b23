use std::path::PathBuf;

use crate::{
    EngineError, InsufficientBalance, LedgerStore, ResultEngine, SnapshotStore, aggregate,
    ledger::LedgerData,
};

mod holdings;
mod loans;
mod sales;
mod snapshots;
mod stakes;
mod summary;

/// The portfolio: one ledger, one snapshot store and the sale policy.
///
/// `Engine` is `Sync`; share it by reference (or `Arc`) between threads.
/// Every mutation is serialized by the ledger lock.
#[derive(Debug)]
pub struct Engine {
    ledger: LedgerStore,
    snapshots: SnapshotStore,
    allow_negative_holdings: bool,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn snapshot_store(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Whether sales may exceed the available balance.
    pub fn allow_negative_holdings(&self) -> bool {
        self.allow_negative_holdings
    }
}

/// Slack for float noise in summed balances, e.g. `0.3 - 0.1` falling just
/// short of `0.2`.
const BALANCE_TOLERANCE: f64 = 1e-9;

/// Reject `requested` units of `coin` when they exceed the available
/// balance (current holdings minus stakes) of `data`.
fn ensure_available(
    data: &LedgerData,
    coin: &str,
    requested: f64,
    operation: &'static str,
) -> ResultEngine<()> {
    let available = aggregate::available_by_coin(data)
        .get(coin)
        .copied()
        .unwrap_or(0.0);
    if requested <= available + BALANCE_TOLERANCE {
        return Ok(());
    }

    let staked = aggregate::stakes_by_coin(data)
        .get(coin)
        .copied()
        .unwrap_or(0.0);
    tracing::warn!(
        "{operation} of {requested} {coin} rejected: {available} available, {staked} staked"
    );
    Err(EngineError::InsufficientBalance(InsufficientBalance {
        coin: coin.to_string(),
        requested,
        available,
        staked,
        operation,
    }))
}

/// The builder for `Engine`
#[derive(Debug)]
pub struct EngineBuilder {
    ledger_path: PathBuf,
    snapshots_path: PathBuf,
    allow_negative_holdings: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("data/portfolio.json"),
            snapshots_path: PathBuf::from("data/snapshots.json"),
            allow_negative_holdings: false,
        }
    }
}

impl EngineBuilder {
    /// Put both files in `dir` under their default names.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> EngineBuilder {
        let dir = dir.into();
        self.ledger_path = dir.join("portfolio.json");
        self.snapshots_path = dir.join("snapshots.json");
        self
    }

    /// Pass the ledger file path
    pub fn ledger_path(mut self, path: impl Into<PathBuf>) -> EngineBuilder {
        self.ledger_path = path.into();
        self
    }

    /// Pass the snapshot file path
    pub fn snapshots_path(mut self, path: impl Into<PathBuf>) -> EngineBuilder {
        self.snapshots_path = path.into();
        self
    }

    /// Let sales exceed the available balance (default: `false`).
    pub fn allow_negative_holdings(mut self, allow: bool) -> EngineBuilder {
        self.allow_negative_holdings = allow;
        self
    }

    /// Construct `Engine`, opening (or creating) the ledger and loading the
    /// snapshots.
    pub fn build(self) -> ResultEngine<Engine> {
        let ledger = LedgerStore::open(&self.ledger_path)?;
        let snapshots = SnapshotStore::open(&self.snapshots_path)?;
        Ok(Engine {
            ledger,
            snapshots,
            allow_negative_holdings: self.allow_negative_holdings,
        })
    }
}
