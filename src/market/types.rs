//! Market generation errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building a round's market
#[derive(Debug, Error)]
pub enum MarketError {
    /// A drawn probability could not be represented as a decimal
    #[error("Invalid probability drawn: {0}")]
    InvalidProbability(f64),
    /// Odds must be strictly positive to imply a probability
    #[error("Invalid odds {odds} for {option}")]
    InvalidOdds { option: String, odds: Decimal },
    /// No option available to carry the value bet
    #[error("Cannot inject a value bet into an empty market")]
    EmptyMarket,
}
