//! Session metrics
//!
//! Emitted through the `metrics` facade; they are no-ops until a recorder is installed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Current bankroll
    Bankroll,
    /// Stake placed in the latest round
    Stake,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Rounds played, skipped ones included
    Rounds,
    /// Settled rounds won
    Wins,
    /// Settled rounds lost
    Losses,
    /// Rounds without a positive-edge option
    SkippedRounds,
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::Bankroll => "kellysim_bankroll",
            GaugeMetric::Stake => "kellysim_stake",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::Rounds => "kellysim_rounds_total",
            CounterMetric::Wins => "kellysim_wins_total",
            CounterMetric::Losses => "kellysim_losses_total",
            CounterMetric::SkippedRounds => "kellysim_skipped_rounds_total",
        }
    }
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: Decimal) {
    let metric_name = metric.name();
    let value = value.to_f64().unwrap_or_default();

    metrics::gauge!(metric_name).set(value);
    tracing::trace!(metric = metric_name, value = value, "Setting gauge");
}

/// Increment a counter by one
pub fn increment_counter(metric: CounterMetric) {
    metrics::counter!(metric.name()).increment(1);
}
