//! Risk module
//!
//! Kelly criterion value bet detection and stake sizing

mod kelly;
mod sizing;

pub use kelly::{kelly_fraction, KellyCalculator, KellyOutcome};
pub use sizing::StakeSizer;
