//! Kelly criterion value bet detection

use crate::market::{OddsBook, Probabilities};
use rust_decimal::Decimal;
use serde::Serialize;

/// Result of scanning a round's market for a value bet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KellyOutcome {
    /// First option with a positive Kelly fraction
    ValueBetFound {
        /// Full Kelly fraction, rounded to 2 decimals
        fraction: Decimal,
        option: String,
        odds: Decimal,
    },
    /// No option has a positive edge
    NoValueBet,
}

/// Kelly criterion calculator for decimal odds
///
/// For decimal odds `o` and win probability `p`:
/// - Net odds: b = o - 1
/// - Kelly fraction: f* = (b*p - (1 - p)) / b
#[derive(Debug, Clone, Copy, Default)]
pub struct KellyCalculator;

impl KellyCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Find the first option, in odds book order, with a positive Kelly fraction
    ///
    /// Later options are never considered once one qualifies, even if their
    /// edge is larger.
    pub fn find_value_bet(&self, odds: &OddsBook, probabilities: &Probabilities) -> KellyOutcome {
        for (option, odd) in odds.iter() {
            let Some(probability) = probabilities.get(option) else {
                continue;
            };
            let Some(fraction) = kelly_fraction(odd, probability) else {
                continue;
            };

            if fraction > Decimal::ZERO {
                return KellyOutcome::ValueBetFound {
                    fraction,
                    option: option.to_string(),
                    odds: odd,
                };
            }
        }

        KellyOutcome::NoValueBet
    }
}

/// Full Kelly fraction rounded to 2 decimals, `None` when `odds <= 1`
pub fn kelly_fraction(odds: Decimal, probability: Decimal) -> Option<Decimal> {
    let net_odds = odds - Decimal::ONE;
    if net_odds <= Decimal::ZERO {
        return None;
    }

    let losing_probability = Decimal::ONE - probability;
    Some(((net_odds * probability - losing_probability) / net_odds).round_dp(2))
}
