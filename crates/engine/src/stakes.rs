//! The module contains `Stake` struct and its implementation.

use serde::{Deserialize, Serialize};

use crate::{ResultEngine, ledger::Record, util};

/// Coins locked on a platform.
///
/// Staked coins are still owned, so they stay in the current holdings, but
/// they are no longer part of the available balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stake {
    pub id: String,
    pub coin: String,
    pub amount: f64,
    pub platform: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Stake {
    /// Build a stake from raw fields. This does not check the balance; see
    /// [`Engine::add_stake`](crate::Engine::add_stake).
    pub fn new(
        coin: &str,
        amount: f64,
        platform: &str,
        apy: Option<f64>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Self> {
        let coin = util::normalize_coin(coin)?;
        util::validate_amount(amount)?;
        let platform = util::require_platform(platform, "stakes")?;
        util::validate_rate("apy", apy)?;
        let date = util::normalize_date(date)?;
        let notes = util::normalize_notes(notes)?;

        Ok(Self {
            id: util::new_id(),
            coin,
            amount,
            platform,
            date,
            apy,
            notes,
        })
    }
}

impl Record for Stake {
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
