use crate::{
    Summary,
    aggregate::{self, CoinAmounts},
};

use super::Engine;

// Each accessor computes from one read of the ledger. Reads are served from
// memory and cannot fail, so there is no partial result to guard against.
impl Engine {
    /// Every aggregate plus counts and USD totals, from one consistent view.
    pub fn summary(&self) -> Summary {
        self.ledger.read(Summary::from_ledger)
    }

    /// Purchased amount per coin, ignoring sales.
    pub fn holdings_by_coin(&self) -> CoinAmounts {
        self.ledger.read(aggregate::holdings_by_coin)
    }

    pub fn sales_by_coin(&self) -> CoinAmounts {
        self.ledger.read(aggregate::sales_by_coin)
    }

    pub fn loans_by_coin(&self) -> CoinAmounts {
        self.ledger.read(aggregate::loans_by_coin)
    }

    pub fn stakes_by_coin(&self) -> CoinAmounts {
        self.ledger.read(aggregate::stakes_by_coin)
    }

    pub fn current_holdings_by_coin(&self) -> CoinAmounts {
        self.ledger.read(aggregate::current_holdings_by_coin)
    }

    pub fn available_by_coin(&self) -> CoinAmounts {
        self.ledger.read(aggregate::available_by_coin)
    }

    pub fn net_by_coin(&self) -> CoinAmounts {
        self.ledger.read(aggregate::net_by_coin)
    }

    pub fn total_invested_usd(&self) -> f64 {
        self.ledger
            .read(|data| aggregate::total_invested_usd(&data.holdings))
    }

    pub fn total_sold_usd(&self) -> f64 {
        self.ledger.read(|data| aggregate::total_sold_usd(&data.sales))
    }
}
