//! Coin balance ledger gating the call action.
//!
//! # Invariants
//! - Balance is never negative (`u32`, checked subtraction).
//! - A rejected debit leaves the balance untouched; there are no partial debits.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Balance granted at session start.
pub const DEFAULT_STARTING_BALANCE: u32 = 100;
/// Coins consumed by one successful call.
pub const CALL_COST: u32 = 20;

/// Debit refused because the balance does not cover the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebitRejection {
    pub balance: u32,
    pub required: u32,
}

impl Display for DebitRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "insufficient funds: balance {} is below required {}",
            self.balance, self.required
        )
    }
}

impl Error for DebitRejection {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomyLedger {
    balance: u32,
}

impl Default for EconomyLedger {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

impl EconomyLedger {
    pub fn new(starting_balance: u32) -> Self {
        Self {
            balance: starting_balance,
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// Debits `amount` and returns the new balance, or rejects without mutation.
    pub fn attempt_debit(&mut self, amount: u32) -> Result<u32, DebitRejection> {
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(DebitRejection {
                balance: self.balance,
                required: amount,
            })?;
        self.balance = remaining;
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::{DebitRejection, EconomyLedger, CALL_COST};

    #[test]
    fn debit_decrements_by_exact_amount() {
        let mut ledger = EconomyLedger::default();
        assert_eq!(ledger.attempt_debit(CALL_COST), Ok(80));
        assert_eq!(ledger.balance(), 80);
    }

    #[test]
    fn exact_balance_can_be_spent_to_zero() {
        let mut ledger = EconomyLedger::new(20);
        assert_eq!(ledger.attempt_debit(20), Ok(0));
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn short_balance_is_rejected_without_mutation() {
        let mut ledger = EconomyLedger::new(19);
        let rejection = ledger.attempt_debit(20).unwrap_err();
        assert_eq!(
            rejection,
            DebitRejection {
                balance: 19,
                required: 20
            }
        );
        assert_eq!(ledger.balance(), 19);
    }

    #[test]
    fn repeated_debits_never_go_negative() {
        let mut ledger = EconomyLedger::default();
        let mut successes = 0;
        for _ in 0..12 {
            if ledger.attempt_debit(CALL_COST).is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 5);
        assert_eq!(ledger.balance(), 0);
    }
}
