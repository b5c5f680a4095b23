use crate::{Holding, ResultEngine};

use super::Engine;

impl Engine {
    /// Record a purchase.
    pub fn add_holding(
        &self,
        coin: &str,
        amount: f64,
        purchase_price_usd: f64,
        platform: Option<&str>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Holding> {
        let holding = Holding::new(coin, amount, purchase_price_usd, platform, notes, date)?;
        self.ledger.add_holding(holding.clone())?;
        tracing::debug!("added holding {} ({} {})", holding.id, holding.amount, holding.coin);
        Ok(holding)
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.ledger.holdings()
    }

    pub fn remove_holding(&self, id: &str) -> ResultEngine<bool> {
        let removed = self.ledger.remove_holding(id)?;
        if removed {
            tracing::debug!("removed holding {id}");
        }
        Ok(removed)
    }
}
