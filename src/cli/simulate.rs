//! Simulate command implementation

use crate::audit::{AuditSink, FileAuditSink, MemoryAuditSink};
use crate::config::{parse_bankroll, parse_percent, Config, SimulationConfig};
use crate::simulation::{
    chart, SimulationLoop, SimulationResult, SimulationSummary, TerminationReason,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

const CHART_WIDTH: usize = 60;
const CHART_HEIGHT: usize = 12;
const BAR_WIDTH: usize = 40;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Default)]
pub struct SimulateArgs {
    /// Starting bankroll (positive whole number)
    #[arg(long, value_parser = parse_bankroll)]
    pub bankroll: Option<u64>,

    /// Options offered each round
    #[arg(long)]
    pub variants: Option<usize>,

    /// Share of full Kelly to stake, 10-100 (e.g. 50 or 50%)
    #[arg(long, value_parser = parse_percent)]
    pub kelly_fraction: Option<u32>,

    /// Number of bets to simulate
    #[arg(long)]
    pub bets: Option<usize>,

    /// Percentage points added to the value bet's probability, 1-100
    #[arg(long, value_parser = parse_percent)]
    pub inflation: Option<u32>,

    /// RNG seed for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Audit log path (overrides config)
    #[arg(long)]
    pub audit_log: Option<PathBuf>,

    /// Output format: table or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Skip the text charts
    #[arg(long)]
    pub no_charts: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a SimulationSummary,
    result: &'a SimulationResult,
}

impl SimulateArgs {
    /// Apply command-line overrides on top of the file configuration
    pub fn simulation_config(&self, base: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            initial_bankroll: self.bankroll.unwrap_or(base.initial_bankroll),
            variants: self.variants.unwrap_or(base.variants),
            kelly_fraction_pct: self.kelly_fraction.unwrap_or(base.kelly_fraction_pct),
            bets: self.bets.unwrap_or(base.bets),
            inflated_probability_pct: self.inflation.unwrap_or(base.inflated_probability_pct),
            seed: self.seed.or(base.seed),
        }
    }

    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let sim_config = self.simulation_config(&config.simulation);
        let mut simulation = SimulationLoop::from_config(sim_config)?;

        let audit_path = self.audit_log.as_ref().unwrap_or(&config.audit.path);
        let mut sink: Box<dyn AuditSink> = if config.audit.enabled || self.audit_log.is_some() {
            Box::new(FileAuditSink::create(audit_path)?)
        } else {
            Box::new(MemoryAuditSink::new())
        };

        let result = simulation.run(sink.as_mut())?;
        let summary = SimulationSummary::from_result(&result);

        match self.format {
            OutputFormat::Json => {
                let report = JsonReport {
                    summary: &summary,
                    result: &result,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Table => {
                println!("{}", summary.format_table());
                if !self.no_charts {
                    println!(
                        "{}",
                        chart::bankroll_chart(&result.bankroll_history, CHART_WIDTH, CHART_HEIGHT)
                    );
                    println!(
                        "{}",
                        chart::win_loss_chart(summary.wins, summary.losses, BAR_WIDTH)
                    );
                }
            }
        }

        match result.termination {
            TerminationReason::Ruined => eprintln!("You ran out of money"),
            TerminationReason::BankrollLimit => {
                eprintln!("Bankroll grew past the largest supported amount, simulation stopped")
            }
            TerminationReason::Completed => {}
        }

        Ok(())
    }
}
