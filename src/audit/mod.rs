//! Audit log
//!
//! Append-only record of a session: start and end markers, one line per
//! round and one per settlement. Sinks are passed into the ledger and the
//! simulation loop rather than configured globally.

mod file;
mod memory;

pub use file::FileAuditSink;
pub use memory::MemoryAuditSink;

use crate::ledger::Settlement;
use crate::simulation::{RoundRecord, TerminationReason};
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Audit sink errors
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to write audit log: {0}")]
    Io(#[from] std::io::Error),
}

/// Severity attached to an audit line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warning,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditLevel::Info => write!(f, "INFO"),
            AuditLevel::Warning => write!(f, "WARNING"),
        }
    }
}

/// One audit record
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEntry {
    SessionStarted {
        session_id: Uuid,
        initial_bankroll: Decimal,
        variants: usize,
        kelly_fraction_pct: u32,
        bets: usize,
        inflated_probability_pct: u32,
    },
    Settlement(Settlement),
    Round(RoundRecord),
    NoValueBet {
        round: usize,
    },
    Ruined {
        round: usize,
        bankroll: Decimal,
    },
    BankrollLimit {
        round: usize,
        bankroll: Decimal,
    },
    SessionEnded {
        final_bankroll: Decimal,
        termination: TerminationReason,
    },
}

impl AuditEntry {
    pub fn level(&self) -> AuditLevel {
        match self {
            AuditEntry::NoValueBet { .. }
            | AuditEntry::Ruined { .. }
            | AuditEntry::BankrollLimit { .. } => AuditLevel::Warning,
            _ => AuditLevel::Info,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEntry::SessionStarted {
                session_id,
                initial_bankroll,
                variants,
                kelly_fraction_pct,
                bets,
                inflated_probability_pct,
            } => write!(
                f,
                "Simulation started. Session: {session_id}. Bankroll: ${:.2}. \
                 Variants: {variants}. Kelly Fraction: {kelly_fraction_pct}%. Bets: {bets}. \
                 Inflated probability: {inflated_probability_pct}%",
                money(*initial_bankroll)
            ),
            AuditEntry::Settlement(s) if s.won => write!(
                f,
                "Win! Gained: ${:.2}. New bankroll: ${:.2}",
                money(s.payoff),
                money(s.bankroll)
            ),
            AuditEntry::Settlement(s) => write!(
                f,
                "Lose. Lost: ${:.2}. New bankroll: ${:.2}",
                money(s.stake),
                money(s.bankroll)
            ),
            AuditEntry::Round(r) => write!(
                f,
                "Bet #{}: Chose {} with odds {}. Bet size: ${}. Probability: {}. Kelly: {}. \
                 Kelly Fraction: {}%. Winner: {}. Bankroll: ${:.2}",
                r.round,
                r.option,
                r.odds,
                r.stake,
                r.probability,
                r.kelly,
                (r.kelly_multiplier * Decimal::ONE_HUNDRED).normalize(),
                r.winner,
                money(r.bankroll)
            ),
            AuditEntry::NoValueBet { round } => {
                write!(f, "Bet #{round}: No value bet found. Round skipped")
            }
            AuditEntry::Ruined { round, bankroll } => {
                write!(
                    f,
                    "You ran out of money after bet #{round}. Bankroll: ${:.2}",
                    money(*bankroll)
                )
            }
            AuditEntry::BankrollLimit { round, bankroll } => {
                write!(
                    f,
                    "Bet #{round}: Bankroll limit reached at ${:.2}. Bet voided, simulation stopped",
                    money(*bankroll)
                )
            }
            AuditEntry::SessionEnded {
                final_bankroll,
                termination,
            } => write!(
                f,
                "Simulation ended ({termination}). Final bankroll: ${:.2}",
                money(*final_bankroll)
            ),
        }
    }
}

/// Round to cents for display
fn money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Destination for audit records
pub trait AuditSink {
    /// Append a record
    fn record(&mut self, entry: &AuditEntry) -> Result<(), AuditError>;

    /// Flush buffered records
    fn flush(&mut self) -> Result<(), AuditError> {
        Ok(())
    }
}
