use crate::{Loan, ResultEngine};

use super::Engine;

impl Engine {
    /// Record borrowed coins. Loans are liabilities and need no balance.
    pub fn add_loan(
        &self,
        coin: &str,
        amount: f64,
        platform: &str,
        interest_rate: Option<f64>,
        notes: Option<&str>,
        date: Option<&str>,
    ) -> ResultEngine<Loan> {
        let loan = Loan::new(coin, amount, platform, interest_rate, notes, date)?;
        self.ledger.add_loan(loan.clone())?;
        tracing::debug!("added loan {} ({} {} on {})", loan.id, loan.amount, loan.coin, loan.platform);
        Ok(loan)
    }

    pub fn loans(&self) -> Vec<Loan> {
        self.ledger.loans()
    }

    pub fn remove_loan(&self, id: &str) -> ResultEngine<bool> {
        let removed = self.ledger.remove_loan(id)?;
        if removed {
            tracing::debug!("removed loan {id}");
        }
        Ok(removed)
    }
}
