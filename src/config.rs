//! Configuration types for kelly-sim

use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Embedded fallback used when no config file can be read
pub const DEFAULT_CONFIG: &str = include_str!("../config.toml.example");

/// Accepted range for the Kelly multiplier, in percent
pub const KELLY_FRACTION_RANGE: std::ops::RangeInclusive<u32> = 10..=100;

/// Accepted range for the value bet inflation, in percent
pub const INFLATION_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Session parameters collected from the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting bankroll in whole dollars
    pub initial_bankroll: u64,
    /// Number of options offered each round
    pub variants: usize,
    /// Share of full Kelly to stake (10-100)
    pub kelly_fraction_pct: u32,
    /// Number of rounds to simulate
    pub bets: usize,
    /// Percentage points added to the value bet's probability (1-100)
    pub inflated_probability_pct: u32,
    /// Optional RNG seed for reproducible sessions
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Audit log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Audit log file, truncated at the start of every run
    #[serde(default = "default_audit_path")]
    pub path: PathBuf,
    /// Write the audit log to disk
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_true() -> bool {
    true
}
fn default_audit_path() -> PathBuf {
    PathBuf::from("betting_log.txt")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: default_audit_path(),
            enabled: true,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

/// User-facing input validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Bankroll must be a positive value.")]
    NonPositiveBankroll,
    #[error("Number of variants must be a positive value.")]
    NoVariants,
    #[error("Please enter a number between 10 and 100.")]
    KellyFractionOutOfRange(u32),
    #[error("Number of bets must be a positive value.")]
    NoBets,
    #[error("Please enter a probability value between 1 and 100.")]
    InflationOutOfRange(u32),
    #[error("Invalid {field} input. Please enter a numeric value.")]
    NotNumeric { field: &'static str, value: String },
}

impl SimulationConfig {
    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_bankroll == 0 {
            return Err(ConfigError::NonPositiveBankroll);
        }
        if self.variants == 0 {
            return Err(ConfigError::NoVariants);
        }
        if !KELLY_FRACTION_RANGE.contains(&self.kelly_fraction_pct) {
            return Err(ConfigError::KellyFractionOutOfRange(
                self.kelly_fraction_pct,
            ));
        }
        if self.bets == 0 {
            return Err(ConfigError::NoBets);
        }
        if !INFLATION_RANGE.contains(&self.inflated_probability_pct) {
            return Err(ConfigError::InflationOutOfRange(
                self.inflated_probability_pct,
            ));
        }
        Ok(())
    }

    /// Starting bankroll as a decimal amount
    pub fn initial_bankroll(&self) -> Decimal {
        Decimal::from(self.initial_bankroll)
    }

    /// Kelly multiplier as a fraction (50% -> 0.50)
    pub fn kelly_multiplier(&self) -> Decimal {
        Decimal::from(self.kelly_fraction_pct) / dec!(100)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse the embedded example configuration
    pub fn embedded() -> anyhow::Result<Self> {
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }
}

/// Parse a whole number typed by a user, tolerating whitespace and a trailing `%`
pub fn parse_whole_number(field: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    digits.parse::<u64>().map_err(|_| ConfigError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

/// Clap value parser for percentage flags such as `--kelly-fraction 50%`
pub fn parse_percent(raw: &str) -> Result<u32, ConfigError> {
    let value = parse_whole_number("percentage", raw)?;
    u32::try_from(value).map_err(|_| ConfigError::NotNumeric {
        field: "percentage",
        value: raw.to_string(),
    })
}

/// Clap value parser for the bankroll flag
pub fn parse_bankroll(raw: &str) -> Result<u64, ConfigError> {
    parse_whole_number("bankroll", raw)
}
