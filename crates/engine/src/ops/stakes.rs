use crate::{ResultEngine, Stake};

use super::{Engine, ensure_available};

impl Engine {
    /// Stake coins on a platform.
    ///
    /// The amount must fit in the available balance of the coin. The balance
    /// is recomputed from the ledger and the stake appended under the same
    /// exclusive lock, so concurrent stakes can never jointly overdraw it.
    pub fn add_stake(
        &self,
        coin: &str,
        amount: f64,
        platform: &str,
        apy: Option<f64>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Stake> {
        let stake = Stake::new(coin, amount, platform, apy, notes, date)?;

        self.ledger.mutate("saving stake", |data| {
            ensure_available(data, &stake.coin, stake.amount, "stake")?;
            data.stakes.push(stake.clone());
            Ok(())
        })?;
        tracing::debug!("added stake {} ({} {} on {})", stake.id, stake.amount, stake.coin, stake.platform);
        Ok(stake)
    }

    pub fn stakes(&self) -> Vec<Stake> {
        self.ledger.stakes()
    }

    /// Unstake. Never balance-checked.
    pub fn remove_stake(&self, id: &str) -> ResultEngine<bool> {
        let removed = self.ledger.remove_stake(id)?;
        if removed {
            tracing::debug!("removed stake {id}");
        }
        Ok(removed)
    }
}
