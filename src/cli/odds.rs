//! Odds command implementation
//!
//! Previews a single generated market without running a session

use crate::config::{parse_percent, Config, SimulationConfig};
use crate::market::{OddsGenerator, ValueBetInjector};
use crate::risk::{kelly_fraction, KellyCalculator, KellyOutcome};
use crate::simulation::session_rng;
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct OddsArgs {
    /// Options to generate (defaults to config)
    #[arg(long)]
    pub variants: Option<usize>,

    /// Percentage points added to the value bet's probability, 1-100
    #[arg(long, value_parser = parse_percent)]
    pub inflation: Option<u32>,

    /// RNG seed for a reproducible market
    #[arg(long)]
    pub seed: Option<u64>,
}

impl OddsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let sim_config = SimulationConfig {
            variants: self.variants.unwrap_or(config.simulation.variants),
            inflated_probability_pct: self
                .inflation
                .unwrap_or(config.simulation.inflated_probability_pct),
            seed: self.seed.or(config.simulation.seed),
            ..config.simulation.clone()
        };
        sim_config.validate()?;

        let mut rng = session_rng(sim_config.seed);
        let odds = OddsGenerator::default().generate(sim_config.variants, &mut rng)?;
        let injected = ValueBetInjector::from_percent(sim_config.inflated_probability_pct)
            .inject(&odds, &mut rng)?;
        let outcome = KellyCalculator::new().find_value_bet(&odds, &injected.probabilities);

        println!("{:<14} {:>8} {:>12} {:>8}", "Option", "Odds", "Probability", "Kelly");
        for (option, odd) in odds.iter() {
            let probability = injected.probabilities.get(option).unwrap_or_default();
            let kelly = kelly_fraction(odd, probability)
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string());
            let marker = if option == injected.boosted { " <- boosted" } else { "" };
            println!("{option:<14} {odd:>8} {probability:>12} {kelly:>8}{marker}");
        }
        println!("Overround: {:.4}", odds.overround().round_dp(4));

        match outcome {
            KellyOutcome::ValueBetFound {
                fraction,
                option,
                odds,
            } => println!("Value bet: {option} at {odds} (Kelly {fraction})"),
            KellyOutcome::NoValueBet => println!("No value bet found"),
        }

        Ok(())
    }
}
