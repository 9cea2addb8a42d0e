//! CLI interface for kelly-sim
//!
//! Provides subcommands for:
//! - `simulate`: Run a betting session and report the results
//! - `odds`: Preview one generated market
//! - `config`: Show the effective configuration

mod odds;
mod simulate;

pub use odds::OddsArgs;
pub use simulate::{OutputFormat, SimulateArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kelly-sim")]
#[command(about = "Kelly criterion betting simulator with synthetic bookmaker odds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a betting session
    Simulate(SimulateArgs),
    /// Preview one generated market
    Odds(OddsArgs),
    /// Show configuration
    Config,
}
