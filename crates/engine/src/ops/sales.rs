use crate::{ResultEngine, Sale};

use super::{Engine, ensure_available};

impl Engine {
    /// Record a sale.
    ///
    /// Unless the engine allows negative holdings, the sale must fit in the
    /// available balance (current holdings minus stakes). The check and the
    /// append happen under one ledger lock.
    pub fn add_sale(
        &self,
        coin: &str,
        amount: f64,
        sell_price_usd: f64,
        platform: Option<&str>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Sale> {
        let sale = Sale::new(coin, amount, sell_price_usd, platform, notes, date)?;
        let strict = !self.allow_negative_holdings;

        self.ledger.mutate("saving sale", |data| {
            if strict {
                ensure_available(data, &sale.coin, sale.amount, "sell")?;
            }
            data.sales.push(sale.clone());
            Ok(())
        })?;
        tracing::debug!("added sale {} ({} {})", sale.id, sale.amount, sale.coin);
        Ok(sale)
    }

    pub fn sales(&self) -> Vec<Sale> {
        self.ledger.sales()
    }

    pub fn remove_sale(&self, id: &str) -> ResultEngine<bool> {
        let removed = self.ledger.remove_sale(id)?;
        if removed {
            tracing::debug!("removed sale {id}");
        }
        Ok(removed)
    }
}
