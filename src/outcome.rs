//! Weighted-random round resolution

use crate::market::Probabilities;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while drawing a winner
#[derive(Debug, Error)]
pub enum OutcomeError {
    #[error("No options to draw a winner from")]
    NoOptions,
    #[error("Got {weights} weights for {options} options")]
    LengthMismatch { options: usize, weights: usize },
    #[error("Invalid outcome weights: {0}")]
    InvalidWeights(String),
}

/// Draws one winner per round
///
/// Weights need not sum to one; only their relative size matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeResolver;

impl OutcomeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Draw a winner from parallel option and weight slices
    pub fn determine_winner<'a, S, R>(
        &self,
        options: &'a [S],
        weights: &[Decimal],
        rng: &mut R,
    ) -> Result<&'a str, OutcomeError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        if options.is_empty() {
            return Err(OutcomeError::NoOptions);
        }
        if options.len() != weights.len() {
            return Err(OutcomeError::LengthMismatch {
                options: options.len(),
                weights: weights.len(),
            });
        }

        let weights = weights
            .iter()
            .map(|w| {
                w.to_f64()
                    .ok_or_else(|| OutcomeError::InvalidWeights(w.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let distribution =
            WeightedIndex::new(&weights).map_err(|e| OutcomeError::InvalidWeights(e.to_string()))?;

        Ok(options[distribution.sample(rng)].as_ref())
    }

    /// Draw a winner weighted by a round's probabilities
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        probabilities: &Probabilities,
        rng: &mut R,
    ) -> Result<String, OutcomeError> {
        let options = probabilities.options();
        let weights = probabilities.values();
        self.determine_winner(&options, &weights, rng)
            .map(str::to_string)
    }
}
