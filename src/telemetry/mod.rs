//! Telemetry module
//!
//! Logging and session metrics

mod logging;
mod recorder;

pub use logging::{init_logging, LogFormat};
pub use recorder::{increment_counter, set_gauge, CounterMetric, GaugeMetric};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.format)
}
