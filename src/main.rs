use clap::Parser;
use kelly_sim::cli::{Cli, Commands};
use kelly_sim::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::embedded()?
        }
    };

    // Initialize telemetry
    kelly_sim::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Simulate(args) => {
            tracing::info!("Starting simulation");
            args.execute(&config)?;
        }
        Commands::Odds(args) => {
            args.execute(&config)?;
        }
        Commands::Config => {
            let sim = &config.simulation;
            println!("Current configuration:");
            println!("  Bankroll: ${}", sim.initial_bankroll);
            println!("  Variants: {}", sim.variants);
            println!("  Kelly fraction: {}%", sim.kelly_fraction_pct);
            println!("  Bets: {}", sim.bets);
            println!("  Inflated probability: {}%", sim.inflated_probability_pct);
            match sim.seed {
                Some(seed) => println!("  Seed: {seed}"),
                None => println!("  Seed: random"),
            }
            println!(
                "  Audit log: {} ({})",
                config.audit.path.display(),
                if config.audit.enabled { "enabled" } else { "disabled" }
            );
            println!(
                "  Logging: {} ({:?})",
                config.telemetry.log_level, config.telemetry.format
            );
        }
    }

    Ok(())
}
