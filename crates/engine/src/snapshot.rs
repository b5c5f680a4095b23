//! Point-in-time valuations of the portfolio and the difference between two
//! of them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, Summary, prices::PriceMap, util};

/// Value of one coin at snapshot time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    pub amount: f64,
    pub price: f64,
    pub value: f64,
}

/// A priced valuation of the portfolio. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub holdings_value: f64,
    pub loans_value: f64,
    /// `holdings_value - loans_value`.
    pub net_value: f64,
    pub total_invested: f64,
    pub total_sold: f64,
    /// `net_value - total_invested + total_sold`.
    pub profit_loss: f64,
    /// `profit_loss / total_invested * 100`, `0` with nothing invested.
    pub profit_percent: f64,
    /// One entry per held coin. Loan-only coins only show up in
    /// `loans_value`.
    #[serde(default)]
    pub coin_values: BTreeMap<String, CoinSnapshot>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl Snapshot {
    /// Value `summary` with `prices`, stamping a fresh ID and the current
    /// time.
    ///
    /// Every coin with a non-zero current holding or loan must have a price;
    /// otherwise nothing is computed and all missing coins are reported.
    ///
    /// Price keys are matched case-insensitively, like recorded coins.
    pub fn from_summary(summary: &Summary, prices: &PriceMap, note: &str) -> ResultEngine<Self> {
        let prices: PriceMap = prices
            .iter()
            .map(|(coin, price)| (coin.trim().to_ascii_uppercase(), *price))
            .collect();
        let missing: Vec<String> = summary
            .coins_needing_prices()
            .into_iter()
            .filter(|coin| !prices.contains_key(coin))
            .collect();
        if !missing.is_empty() {
            tracing::warn!("snapshot refused, missing prices for {}", missing.join(", "));
            return Err(EngineError::MissingPrices(missing));
        }

        let price_of = |coin: &str| -> ResultEngine<f64> {
            let price = prices.get(coin).copied().unwrap_or_default();
            util::validate_price("price", price)?;
            Ok(price)
        };

        let mut coin_values = BTreeMap::new();
        let mut holdings_value = 0.0;
        for (coin, amount) in summary.holdings_by_coin.iter().filter(|(_, a)| **a != 0.0) {
            let price = price_of(coin)?;
            let value = amount * price;
            holdings_value += value;
            coin_values.insert(
                coin.clone(),
                CoinSnapshot {
                    amount: *amount,
                    price,
                    value,
                },
            );
        }

        let mut loans_value = 0.0;
        for (coin, amount) in summary.loans_by_coin.iter().filter(|(_, a)| **a != 0.0) {
            loans_value += amount * price_of(coin)?;
        }

        let net_value = holdings_value - loans_value;
        let profit_loss = net_value - summary.total_invested_usd + summary.total_sold_usd;
        let profit_percent = if summary.total_invested_usd == 0.0 {
            0.0
        } else {
            profit_loss / summary.total_invested_usd * 100.0
        };

        Ok(Self {
            id: util::new_id(),
            timestamp: Utc::now(),
            holdings_value,
            loans_value,
            net_value,
            total_invested: summary.total_invested_usd,
            total_sold: summary.total_sold_usd,
            profit_loss,
            profit_percent,
            coin_values,
            note: note.trim().to_string(),
        })
    }

    /// Order two snapshots as `(older, newer)` by timestamp.
    pub fn chronological<'a>(a: &'a Snapshot, b: &'a Snapshot) -> (&'a Snapshot, &'a Snapshot) {
        if a.timestamp > b.timestamp {
            (b, a)
        } else {
            (a, b)
        }
    }
}

/// Change of one coin between two snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CoinChange {
    pub old_amount: f64,
    pub new_amount: f64,
    pub old_price: f64,
    pub new_price: f64,
    pub old_value: f64,
    pub new_value: f64,
    pub value_change: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnapshotComparison {
    pub older_id: String,
    pub newer_id: String,
    pub net_value_change: f64,
    pub net_value_percent: f64,
    pub profit_loss_change: f64,
    pub coin_changes: BTreeMap<String, CoinChange>,
}

/// Compare `older` to `newer` as given; the caller decides the order (see
/// [`Snapshot::chronological`]).
pub fn compare_snapshots(older: &Snapshot, newer: &Snapshot) -> SnapshotComparison {
    let net_value_change = newer.net_value - older.net_value;
    let net_value_percent = if older.net_value == 0.0 {
        0.0
    } else {
        net_value_change / older.net_value * 100.0
    };

    let coins: BTreeSet<&String> = older
        .coin_values
        .keys()
        .chain(newer.coin_values.keys())
        .collect();
    let coin_changes = coins
        .into_iter()
        .map(|coin| {
            let old = older.coin_values.get(coin).copied().unwrap_or_default();
            let new = newer.coin_values.get(coin).copied().unwrap_or_default();
            let change = CoinChange {
                old_amount: old.amount,
                new_amount: new.amount,
                old_price: old.price,
                new_price: new.price,
                old_value: old.value,
                new_value: new.value,
                value_change: new.value - old.value,
            };
            (coin.clone(), change)
        })
        .collect();

    SnapshotComparison {
        older_id: older.id.clone(),
        newer_id: newer.id.clone(),
        net_value_change,
        net_value_percent,
        profit_loss_change: newer.profit_loss - older.profit_loss,
        coin_changes,
    }
}
