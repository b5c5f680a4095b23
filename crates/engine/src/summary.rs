//! The module contains `Summary`, the derived overview of the ledger.

use serde::Serialize;

use crate::{
    aggregate::{self, CoinAmounts},
    ledger::LedgerData,
};

/// Derived overview of the ledger. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_holdings_count: usize,
    pub total_sales_count: usize,
    pub total_loans_count: usize,
    pub total_stakes_count: usize,
    pub total_invested_usd: f64,
    pub total_sold_usd: f64,
    /// Current holdings: purchases minus sales.
    pub holdings_by_coin: CoinAmounts,
    pub loans_by_coin: CoinAmounts,
    pub stakes_by_coin: CoinAmounts,
    /// Current holdings minus stakes.
    pub available_by_coin: CoinAmounts,
    /// Current holdings minus loans.
    pub net_by_coin: CoinAmounts,
}

impl Summary {
    /// Build every field from one consistent view of the ledger.
    pub fn from_ledger(data: &LedgerData) -> Self {
        let current = aggregate::current_holdings_by_coin(data);
        let loans = aggregate::loans_by_coin(data);
        let stakes = aggregate::stakes_by_coin(data);

        Self {
            total_holdings_count: data.holdings.len(),
            total_sales_count: data.sales.len(),
            total_loans_count: data.loans.len(),
            total_stakes_count: data.stakes.len(),
            total_invested_usd: aggregate::total_invested_usd(&data.holdings),
            total_sold_usd: aggregate::total_sold_usd(&data.sales),
            available_by_coin: aggregate::difference(&current, &stakes),
            net_by_coin: aggregate::difference(&current, &loans),
            holdings_by_coin: current,
            loans_by_coin: loans,
            stakes_by_coin: stakes,
        }
    }

    /// Coins a valuation needs a price for: non-zero current holdings plus
    /// non-zero loans, sorted and without duplicates.
    pub fn coins_needing_prices(&self) -> Vec<String> {
        let mut coins: Vec<String> = self
            .holdings_by_coin
            .iter()
            .chain(&self.loans_by_coin)
            .filter(|(_, amount)| **amount != 0.0)
            .map(|(coin, _)| coin.clone())
            .collect();
        coins.sort();
        coins.dedup();
        coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Holding, Loan, Sale, Stake};

    #[test]
    fn summary_matches_individual_aggregates() {
        let date = Some("2024-03-01");
        let data = LedgerData {
            holdings: vec![
                Holding::new("SOL", 10.0, 100.0, None, None, date).unwrap(),
                Holding::new("ADA", 1.0, 0.5, None, None, date).unwrap(),
            ],
            sales: vec![
                Sale::new("SOL", 2.0, 150.0, None, None, date).unwrap(),
                Sale::new("ADA", 1.0, 0.75, None, None, date).unwrap(),
            ],
            loans: vec![Loan::new("USDC", 300.0, "Aave", None, None, date).unwrap()],
            stakes: vec![Stake::new("SOL", 5.0, "Marinade", None, None, date).unwrap()],
        };

        let summary = Summary::from_ledger(&data);
        assert_eq!(summary.total_holdings_count, 2);
        assert_eq!(summary.total_sales_count, 2);
        assert_eq!(summary.total_loans_count, 1);
        assert_eq!(summary.total_stakes_count, 1);
        assert_eq!(summary.holdings_by_coin, aggregate::current_holdings_by_coin(&data));
        assert_eq!(summary.available_by_coin, aggregate::available_by_coin(&data));
        assert_eq!(summary.net_by_coin, aggregate::net_by_coin(&data));
        assert_eq!(summary.total_invested_usd, 1_000.5);
        assert_eq!(summary.total_sold_usd, 300.75);
        // ADA is fully sold, so only SOL and the USDC loan need prices.
        assert_eq!(summary.coins_needing_prices(), vec!["SOL", "USDC"]);
    }

    #[test]
    fn empty_summary() {
        let summary = Summary::from_ledger(&LedgerData::default());
        assert_eq!(summary, Summary::default());
        assert!(summary.coins_needing_prices().is_empty());
    }
}
