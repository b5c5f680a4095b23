use crate::{
    ResultEngine, Snapshot,
    prices::{PriceMap, PriceOracle},
};

use super::Engine;

impl Engine {
    /// Coins a valuation needs a price for right now.
    pub fn coins_needing_prices(&self) -> Vec<String> {
        self.summary().coins_needing_prices()
    }

    /// Value the current portfolio with `prices` without storing it.
    pub fn create_snapshot(&self, prices: &PriceMap, note: &str) -> ResultEngine<Snapshot> {
        let summary = self.summary();
        Snapshot::from_summary(&summary, prices, note)
    }

    /// Value the current portfolio and store the snapshot.
    pub fn save_snapshot(&self, prices: &PriceMap, note: &str) -> ResultEngine<Snapshot> {
        let snapshot = self.create_snapshot(prices, note)?;
        self.snapshots.add(snapshot.clone())?;
        tracing::debug!("saved snapshot {} (net {})", snapshot.id, snapshot.net_value);
        Ok(snapshot)
    }

    /// Ask `oracle` for the coins that need a price, then value the
    /// portfolio without storing it.
    ///
    /// The oracle runs outside the ledger lock. A record added in between
    /// that brings a new coin surfaces as a missing price.
    pub fn snapshot_with(&self, oracle: &impl PriceOracle, note: &str) -> ResultEngine<Snapshot> {
        let coins = self.coins_needing_prices();
        let prices = if coins.is_empty() {
            PriceMap::new()
        } else {
            oracle.prices(&coins)?
        };
        self.create_snapshot(&prices, note)
    }

    /// [`Engine::snapshot_with`] followed by storing the snapshot.
    pub fn save_snapshot_with(
        &self,
        oracle: &impl PriceOracle,
        note: &str,
    ) -> ResultEngine<Snapshot> {
        let snapshot = self.snapshot_with(oracle, note)?;
        self.snapshots.add(snapshot.clone())?;
        tracing::debug!("saved snapshot {} (net {})", snapshot.id, snapshot.net_value);
        Ok(snapshot)
    }

    /// Stored snapshots, newest first.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.list()
    }

    pub fn snapshot(&self, id: &str) -> Option<Snapshot> {
        self.snapshots.get(id)
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.count()
    }

    pub fn remove_snapshot(&self, id: &str) -> ResultEngine<bool> {
        let removed = self.snapshots.remove(id)?;
        if removed {
            tracing::debug!("removed snapshot {id}");
        }
        Ok(removed)
    }
}
