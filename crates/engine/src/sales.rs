//! The module contains `Sale`, coins leaving the user's custody.

use serde::{Deserialize, Serialize};

use crate::{ResultEngine, ledger::Record, util};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub coin: String,
    pub amount: f64,
    pub sell_price_usd: f64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Sale {
    pub fn new(
        coin: &str,
        amount: f64,
        sell_price_usd: f64,
        platform: Option<&str>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Self> {
        let coin = util::normalize_coin(coin)?;
        util::validate_amount(amount)?;
        util::validate_price("price", sell_price_usd)?;
        let date = util::normalize_date(date)?;
        let platform = util::normalize_platform(platform)?;
        let notes = util::normalize_notes(notes)?;

        Ok(Self {
            id: util::new_id(),
            coin,
            amount,
            sell_price_usd,
            date,
            platform,
            notes,
        })
    }

    /// Proceeds of the sale in USD.
    #[must_use]
    pub fn total_value_usd(&self) -> f64 {
        self.amount * self.sell_price_usd
    }
}

impl Record for Sale {
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
