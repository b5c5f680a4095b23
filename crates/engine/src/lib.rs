//! Crypto portfolio engine.
//!
//! A ledger of purchases, sales, loans and stakes persisted as one JSON
//! document, per-coin aggregation over it, and priced point-in-time
//! snapshots stored in a second document.
//!
//! [`Engine`] is the entry point:
//!
//! ```no_run
//! use engine::{Engine, StaticPrices};
//!
//! let engine = Engine::builder().data_dir("data").build()?;
//! engine.add_holding("btc", 0.5, 42_000.0, Some("Kraken"), None, None)?;
//! let prices = StaticPrices::from_pairs([("BTC", 65_000.0)])?;
//! let snapshot = engine.save_snapshot_with(&prices, "weekly")?;
//! println!("net value: {}", snapshot.net_value);
//! # Ok::<(), engine::EngineError>(())
//! ```

pub use error::{EngineError, InsufficientBalance, StorageError};
pub use holdings::Holding;
pub use ledger::{LedgerData, LedgerStore, Record};
pub use loans::Loan;
pub use ops::{Engine, EngineBuilder};
pub use prices::{PriceMap, PriceOracle, StaticPrices};
pub use sales::Sale;
pub use snapshot::{CoinChange, CoinSnapshot, Snapshot, SnapshotComparison, compare_snapshots};
pub use snapshot_store::SnapshotStore;
pub use stakes::Stake;
pub use summary::Summary;

pub mod aggregate;
mod error;
mod holdings;
mod ledger;
mod loans;
mod ops;
mod persist;
mod prices;
mod sales;
mod snapshot;
mod snapshot_store;
mod stakes;
mod summary;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
