//! Bankroll ledger
//!
//! Owns the running bankroll and the session history. Every settlement is
//! written to the injected audit sink.

use crate::audit::{AuditEntry, AuditError, AuditSink};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Settling would push the bankroll past the largest representable amount
    #[error("Bankroll overflow settling a stake of {stake} at odds {odds} on {bankroll}")]
    Overflow {
        bankroll: Decimal,
        stake: Decimal,
        odds: Decimal,
    },
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Outcome of settling one stake
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// Amount staked
    pub stake: Decimal,
    /// Signed change to the bankroll: the gain on a win, `-stake` on a loss
    pub payoff: Decimal,
    /// Bankroll after settlement
    pub bankroll: Decimal,
    pub won: bool,
}

/// Apply a bet's result to a bankroll, `None` on overflow
pub fn update_bankroll(
    bankroll: Decimal,
    stake: Decimal,
    odds: Decimal,
    won: bool,
) -> Option<Decimal> {
    if won {
        let gain = stake.checked_mul(odds.checked_sub(Decimal::ONE)?)?;
        bankroll.checked_add(gain)
    } else {
        bankroll.checked_sub(stake)
    }
}

/// Running bankroll plus append-only history
#[derive(Debug, Clone)]
pub struct BankrollLedger {
    bankroll: Decimal,
    history: Vec<Decimal>,
    results: Vec<bool>,
}

impl BankrollLedger {
    /// Create a ledger; the initial bankroll is the first history entry
    pub fn new(initial_bankroll: Decimal) -> Self {
        Self {
            bankroll: initial_bankroll,
            history: vec![initial_bankroll],
            results: Vec::new(),
        }
    }

    pub fn bankroll(&self) -> Decimal {
        self.bankroll
    }

    /// Bankroll snapshots, starting with the initial bankroll
    pub fn history(&self) -> &[Decimal] {
        &self.history
    }

    /// Win/loss flag per settled round
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    /// Bankroll is exhausted
    pub fn is_ruined(&self) -> bool {
        self.bankroll <= Decimal::ZERO
    }

    /// Settle a stake, append to history and audit the settlement
    ///
    /// On overflow nothing is recorded and the ledger is left untouched.
    pub fn settle(
        &mut self,
        stake: Decimal,
        odds: Decimal,
        won: bool,
        sink: &mut dyn AuditSink,
    ) -> Result<Settlement, LedgerError> {
        let updated =
            update_bankroll(self.bankroll, stake, odds, won).ok_or(LedgerError::Overflow {
                bankroll: self.bankroll,
                stake,
                odds,
            })?;
        let settlement = Settlement {
            stake,
            payoff: updated - self.bankroll,
            bankroll: updated,
            won,
        };

        self.bankroll = updated;
        self.history.push(updated);
        self.results.push(won);

        sink.record(&AuditEntry::Settlement(settlement.clone()))?;
        Ok(settlement)
    }

    /// Consume the ledger into (final bankroll, history, results)
    pub fn into_parts(self) -> (Decimal, Vec<Decimal>, Vec<bool>) {
        (self.bankroll, self.history, self.results)
    }
}
