//! The module contains `Holding`, a recorded coin purchase.

use serde::{Deserialize, Serialize};

use crate::{ResultEngine, ledger::Record, util};

/// A coin purchase.
///
/// Holdings are immutable once recorded: correcting one means removing it
/// and recording a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    /// Upper-case coin symbol.
    pub coin: String,
    pub amount: f64,
    pub purchase_price_usd: f64,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Holding {
    /// Validate the raw fields and build a holding with a fresh ID.
    pub fn new(
        coin: &str,
        amount: f64,
        purchase_price_usd: f64,
        platform: Option<&str>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Self> {
        let coin = util::normalize_coin(coin)?;
        util::validate_amount(amount)?;
        util::validate_price("price", purchase_price_usd)?;
        let date = util::normalize_date(date)?;
        let platform = util::normalize_platform(platform)?;
        let notes = util::normalize_notes(notes)?;

        Ok(Self {
            id: util::new_id(),
            coin,
            amount,
            purchase_price_usd,
            date,
            platform,
            notes,
        })
    }

    /// Cost of the purchase in USD.
    #[must_use]
    pub fn total_value_usd(&self) -> f64 {
        self.amount * self.purchase_price_usd
    }
}

impl Record for Holding {
    fn id(&self) -> &str {
        &self.id
    }

    fn coin(&self) -> &str {
        &self.coin
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}
