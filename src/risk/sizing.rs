//! Stake sizing
//!
//! Scales the full Kelly fraction by the user's Kelly multiplier. Once the
//! bankroll has dropped to a dollar or less the whole remainder is staked, so
//! a near-broke session resolves instead of dwindling forever.

use rust_decimal::Decimal;

/// Converts a Kelly fraction into a stake
#[derive(Debug, Clone)]
pub struct StakeSizer {
    /// Share of full Kelly to bet (e.g., 0.25 for quarter Kelly)
    pub multiplier: Decimal,
    /// Bankroll at or below which everything is staked
    pub all_in_threshold: Decimal,
}

impl StakeSizer {
    /// Create a new sizer
    pub fn new(multiplier: Decimal) -> Self {
        Self {
            multiplier,
            all_in_threshold: Decimal::ONE,
        }
    }

    /// Stake for the given bankroll and full Kelly fraction, rounded to cents
    pub fn stake(&self, bankroll: Decimal, kelly_fraction: Decimal) -> Decimal {
        if bankroll <= self.all_in_threshold {
            return bankroll.max(Decimal::ZERO);
        }

        let share = kelly_fraction.saturating_mul(self.multiplier);
        let stake = match bankroll.checked_mul(share) {
            Some(stake) => stake.round_dp(2),
            // Magnitude beyond Decimal::MAX is beyond the bankroll too
            None if share.is_sign_positive() => bankroll,
            None => Decimal::ZERO,
        };

        stake.min(bankroll).max(Decimal::ZERO)
    }
}

impl Default for StakeSizer {
    fn default() -> Self {
        Self::new(Decimal::ONE)
    }
}
