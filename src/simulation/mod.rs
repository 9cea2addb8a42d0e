//! Simulation module
//!
//! Runs betting sessions headlessly and summarizes their results

mod analytics;
pub mod chart;
mod simulator;
mod types;

pub use analytics::SimulationSummary;
pub use simulator::SimulationLoop;
pub use types::{
    RoundRecord, SimulationError, SimulationResult, SimulationState, TerminationReason,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random source for a session: seeded when reproducibility is requested
pub fn session_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
