//! Value bet injection
//!
//! The bookmaker's implied probabilities are taken as fair, then one option
//! picked uniformly at random gets its probability boosted. That option is the
//! round's only source of edge.

use super::{MarketError, OddsBook, Probabilities};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Upper bound for a boosted probability
pub const MAX_PROBABILITY: Decimal = dec!(0.999);

/// Probabilities for a round together with the option that was boosted
#[derive(Debug, Clone)]
pub struct InjectedValueBet {
    pub probabilities: Probabilities,
    pub boosted: String,
}

/// Inflates one option's implied probability
#[derive(Debug, Clone)]
pub struct ValueBetInjector {
    /// Probability added to the boosted option (10% -> 0.10)
    inflation: Decimal,
}

impl ValueBetInjector {
    /// Create an injector from a percentage in 1..=100
    pub fn from_percent(percent: u32) -> Self {
        Self {
            inflation: Decimal::from(percent) / dec!(100),
        }
    }

    /// Derive probabilities from `odds` and boost one option at random
    pub fn inject<R: Rng + ?Sized>(
        &self,
        odds: &OddsBook,
        rng: &mut R,
    ) -> Result<InjectedValueBet, MarketError> {
        if odds.is_empty() {
            return Err(MarketError::EmptyMarket);
        }

        let mut probabilities = implied_probabilities(odds)?;
        let index = rng.gen_range(0..probabilities.len());
        let boosted = probabilities
            .option_at(index)
            .ok_or(MarketError::EmptyMarket)?
            .to_string();

        if let Some(fair) = probabilities.get(&boosted) {
            let inflated = (fair + self.inflation).round_dp(3).min(MAX_PROBABILITY);
            probabilities.insert(boosted.clone(), inflated);
            tracing::trace!(option = %boosted, %fair, %inflated, "Injected value bet");
        }

        Ok(InjectedValueBet {
            probabilities,
            boosted,
        })
    }
}

/// Implied probability per option, 1/odds rounded to 3 decimals
pub fn implied_probabilities(odds: &OddsBook) -> Result<Probabilities, MarketError> {
    odds.iter()
        .map(|(option, odd)| {
            if odd <= Decimal::ZERO {
                return Err(MarketError::InvalidOdds {
                    option: option.to_string(),
                    odds: odd,
                });
            }
            Ok((option, (Decimal::ONE / odd).round_dp(3)))
        })
        .collect()
}
