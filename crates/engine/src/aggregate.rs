//! Pure reductions of the ledger into per-coin totals and derived balances.
//!
//! Nothing here is cached: every caller recomputes from the ledger it holds
//! under lock, so a derived value can never be stale. Maps are ordered by
//! coin, which keeps floating-point sums deterministic.

use std::collections::BTreeMap;

use crate::{Holding, Sale, ledger::LedgerData, ledger::Record};

/// Amount per normalized coin symbol.
pub type CoinAmounts = BTreeMap<String, f64>;

/// Sum `amount` grouped by coin, in record order.
pub fn sum_by_coin<T: Record>(records: &[T]) -> CoinAmounts {
    let mut by_coin = CoinAmounts::new();
    for record in records {
        *by_coin.entry(record.coin().to_string()).or_insert(0.0) += record.amount();
    }
    by_coin
}

/// `lhs - rhs` over the union of both key sets.
///
/// A coin missing on one side counts as `0` there. A coin is kept while
/// either operand or the result is non-zero, so it only disappears once
/// both sides are zero.
pub fn difference(lhs: &CoinAmounts, rhs: &CoinAmounts) -> CoinAmounts {
    let mut result = CoinAmounts::new();
    for coin in lhs.keys().chain(rhs.keys()) {
        if result.contains_key(coin) {
            continue;
        }
        let left = lhs.get(coin).copied().unwrap_or(0.0);
        let right = rhs.get(coin).copied().unwrap_or(0.0);
        let value = left - right;
        if value != 0.0 || left != 0.0 || right != 0.0 {
            result.insert(coin.clone(), value);
        }
    }
    result
}

pub fn holdings_by_coin(data: &LedgerData) -> CoinAmounts {
    sum_by_coin(&data.holdings)
}

pub fn sales_by_coin(data: &LedgerData) -> CoinAmounts {
    sum_by_coin(&data.sales)
}

pub fn loans_by_coin(data: &LedgerData) -> CoinAmounts {
    sum_by_coin(&data.loans)
}

pub fn stakes_by_coin(data: &LedgerData) -> CoinAmounts {
    sum_by_coin(&data.stakes)
}

/// Purchases minus sales: what is owned right now.
pub fn current_holdings_by_coin(data: &LedgerData) -> CoinAmounts {
    difference(&holdings_by_coin(data), &sales_by_coin(data))
}

/// Current holdings minus stakes: the liquid part.
pub fn available_by_coin(data: &LedgerData) -> CoinAmounts {
    difference(&current_holdings_by_coin(data), &stakes_by_coin(data))
}

/// Current holdings minus loans. Negative for coins borrowed but not held.
pub fn net_by_coin(data: &LedgerData) -> CoinAmounts {
    difference(&current_holdings_by_coin(data), &loans_by_coin(data))
}

pub fn total_invested_usd(holdings: &[Holding]) -> f64 {
    holdings.iter().map(Holding::total_value_usd).sum()
}

pub fn total_sold_usd(sales: &[Sale]) -> f64 {
    sales.iter().map(Sale::total_value_usd).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Loan, Stake};

    fn amounts(pairs: &[(&str, f64)]) -> CoinAmounts {
        pairs.iter().map(|(c, a)| (c.to_string(), *a)).collect()
    }

    fn ledger() -> LedgerData {
        let date = Some("2024-01-15");
        LedgerData {
            holdings: vec![
                Holding::new("BTC", 2.0, 45_000.0, None, None, date).unwrap(),
                Holding::new("btc", 1.0, 55_000.0, None, None, date).unwrap(),
                Holding::new("ETH", 4.0, 2_000.0, None, None, date).unwrap(),
            ],
            sales: vec![
                Sale::new("BTC", 0.5, 60_000.0, None, None, date).unwrap(),
                Sale::new("ETH", 4.0, 2_500.0, None, None, date).unwrap(),
            ],
            loans: vec![Loan::new("USDT", 1_000.0, "Nexo", None, None, date).unwrap()],
            stakes: vec![Stake::new("BTC", 1.0, "Kraken", Some(4.0), None, date).unwrap()],
        }
    }

    #[test]
    fn sums_group_by_normalized_coin() {
        let data = ledger();
        assert_eq!(holdings_by_coin(&data), amounts(&[("BTC", 3.0), ("ETH", 4.0)]));
        assert_eq!(sales_by_coin(&data), amounts(&[("BTC", 0.5), ("ETH", 4.0)]));
    }

    #[test]
    fn derived_balances() {
        let data = ledger();
        assert_eq!(
            current_holdings_by_coin(&data),
            amounts(&[("BTC", 2.5), ("ETH", 0.0)])
        );
        // ETH is fully sold and never staked: it drops out of available.
        assert_eq!(available_by_coin(&data), amounts(&[("BTC", 1.5)]));
        assert_eq!(
            net_by_coin(&data),
            amounts(&[("BTC", 2.5), ("USDT", -1_000.0)])
        );
    }

    #[test]
    fn totals_cover_every_record() {
        let data = ledger();
        assert_eq!(total_invested_usd(&data.holdings), 145_000.0 + 8_000.0);
        assert_eq!(total_sold_usd(&data.sales), 30_000.0 + 10_000.0);
    }

    #[test]
    fn difference_keeps_one_sided_coins() {
        let lhs = amounts(&[("BTC", 1.0)]);
        let rhs = amounts(&[("SOL", 2.0)]);
        assert_eq!(
            difference(&lhs, &rhs),
            amounts(&[("BTC", 1.0), ("SOL", -2.0)])
        );
    }

    #[test]
    fn difference_drops_coins_zero_on_both_sides() {
        let lhs = amounts(&[("BTC", 0.0), ("ETH", 1.0)]);
        let rhs = amounts(&[("ETH", 1.0)]);
        assert_eq!(difference(&lhs, &rhs), amounts(&[("ETH", 0.0)]));
    }

    #[test]
    fn empty_ledger_has_no_entries() {
        let data = LedgerData::default();
        assert!(current_holdings_by_coin(&data).is_empty());
        assert!(available_by_coin(&data).is_empty());
        assert!(net_by_coin(&data).is_empty());
        assert_eq!(total_invested_usd(&data.holdings), 0.0);
    }
}
