//! The module contains `Loan` struct and its implementation.

use serde::{Deserialize, Serialize};

use crate::{ResultEngine, ledger::Record, util};

/// Borrowed coins.
///
/// A loan is a liability: it lowers the net exposure of its coin and its
/// value is subtracted when a snapshot is taken. It never counts as an asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    pub coin: String,
    pub amount: f64,
    pub platform: String,
    pub date: String,
    /// Yearly interest rate in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Loan {
    pub fn new(
        coin: &str,
        amount: f64,
        platform: &str,
        interest_rate: Option<f64>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Self> {
        let coin = util::normalize_coin(coin)?;
        util::validate_amount(amount)?;
        let platform = util::require_platform(platform, "loans")?;
        util::validate_rate("interest_rate", interest_rate)?;
        let date = util::normalize_date(date)?;
        let notes = util::normalize_notes(notes)?;

        Ok(Self {
            id: util::new_id(),
            coin,
            amount,
            platform,
            date,
            interest_rate,
            notes,
        })
    }
}

impl Record for Loan {
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
