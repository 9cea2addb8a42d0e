//! Synthetic odds generation
//!
//! Options are split into three tiers (favorites, mid-range, longshots) whose
//! raw win probabilities are drawn uniformly, then normalized to sum to the
//! bookmaker margin before conversion to decimal odds.

use super::{MarketError, OddsBook};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sum of implied probabilities of every generated market (5% margin)
pub const BOOKMAKER_MARGIN: Decimal = dec!(1.05);

/// Lowest odds ever offered; keeps `odds - 1` positive
pub const MIN_ODDS: Decimal = dec!(1.01);

const FAVORITE_RANGE: (f64, f64) = (0.5, 0.6);
const MID_RANGE: (f64, f64) = (0.3, 0.5);
const LONGSHOT_RANGE: (f64, f64) = (0.1, 0.3);

/// Generates one round's odds
#[derive(Debug, Clone)]
pub struct OddsGenerator {
    margin: Decimal,
}

impl OddsGenerator {
    /// Create a generator with a custom margin
    pub fn new(margin: Decimal) -> Self {
        Self { margin }
    }

    /// Generate odds for `count` options labeled "Variant A", "Variant B", ...
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<OddsBook, MarketError> {
        let favorites = count / 3;
        let mid = count / 3;
        let longshots = count - favorites - mid;

        let mut draws = Vec::with_capacity(count);
        for (tier_size, (low, high)) in [
            (favorites, FAVORITE_RANGE),
            (mid, MID_RANGE),
            (longshots, LONGSHOT_RANGE),
        ] {
            for _ in 0..tier_size {
                draws.push(rng.gen_range(low..high));
            }
        }

        let probabilities = draws
            .into_iter()
            .map(|p| Decimal::try_from(p).map_err(|_| MarketError::InvalidProbability(p)))
            .collect::<Result<Vec<_>, _>>()?;
        let total: Decimal = probabilities.iter().sum();

        let mut book = OddsBook::new();
        for (index, probability) in probabilities.into_iter().enumerate() {
            let adjusted = probability / total * self.margin;
            let odds = (Decimal::ONE / adjusted).round_dp(2).max(MIN_ODDS);
            book.insert(variant_label(index), odds);
        }

        tracing::trace!(count, overround = %book.overround(), "Generated odds");
        Ok(book)
    }
}

impl Default for OddsGenerator {
    fn default() -> Self {
        Self::new(BOOKMAKER_MARGIN)
    }
}

/// Label for the option at `index`: A..Z, then AA, AB, ...
pub fn variant_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    let suffix: String = letters.into_iter().rev().collect();
    format!("Variant {suffix}")
}
