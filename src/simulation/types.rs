//! Simulation types

use crate::audit::AuditError;
use crate::config::ConfigError;
use crate::market::MarketError;
use crate::outcome::OutcomeError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors that abort a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration rejected before the first round
    #[error(transparent)]
    InvalidInput(#[from] ConfigError),
    /// Odds or probabilities could not be generated
    #[error("An error occurred during odds generation: {0}")]
    OddsGeneration(#[from] MarketError),
    /// Winner could not be drawn
    #[error("An error occurred while resolving the round: {0}")]
    Outcome(#[from] OutcomeError),
    /// Audit log could not be written
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// All configured rounds were played
    Completed,
    /// Bankroll reached zero or below
    Ruined,
    /// A win would have grown the bankroll past the largest representable amount
    BankrollLimit,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "completed"),
            TerminationReason::Ruined => write!(f, "ruined"),
            TerminationReason::BankrollLimit => write!(f, "bankroll limit"),
        }
    }
}

/// Simulation loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Running,
    Terminated(TerminationReason),
}

impl SimulationState {
    /// State after a round; ruin takes precedence over completion
    pub fn after_round(ruined: bool, rounds_played: usize, rounds_total: usize) -> Self {
        if ruined {
            SimulationState::Terminated(TerminationReason::Ruined)
        } else if rounds_played >= rounds_total {
            SimulationState::Terminated(TerminationReason::Completed)
        } else {
            SimulationState::Running
        }
    }
}

/// Details of one settled round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub round: usize,
    /// Option the stake was placed on
    pub option: String,
    pub odds: Decimal,
    /// Probability assigned to the chosen option
    pub probability: Decimal,
    /// Full Kelly fraction
    pub kelly: Decimal,
    /// Share of full Kelly applied
    pub kelly_multiplier: Decimal,
    pub stake: Decimal,
    pub winner: String,
    pub won: bool,
    /// Bankroll after settlement
    pub bankroll: Decimal,
}

/// Everything a finished session produced
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub initial_bankroll: Decimal,
    pub final_bankroll: Decimal,
    /// Bankroll snapshots, initial bankroll first, then one per settled round
    pub bankroll_history: Vec<Decimal>,
    /// Win/loss flag per settled round
    pub results_history: Vec<bool>,
    pub rounds: Vec<RoundRecord>,
    /// Rounds where no option had a positive edge
    pub skipped_rounds: usize,
    pub termination: TerminationReason,
}

impl SimulationResult {
    pub fn wins(&self) -> usize {
        self.results_history.iter().filter(|won| **won).count()
    }

    pub fn losses(&self) -> usize {
        self.results_history.len() - self.wins()
    }

    pub fn is_ruined(&self) -> bool {
        self.termination == TerminationReason::Ruined
    }
}
