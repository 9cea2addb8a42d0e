//! Configuration loading tests

use kelly_sim::config::{Config, ConfigError};
use std::io::Write;

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.simulation.initial_bankroll, 1000);
    assert!(config.simulation.validate().is_ok());
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [simulation]
        initial_bankroll = 250
        variants = 5
        kelly_fraction_pct = 30
        bets = 20
        inflated_probability_pct = 3
        seed = 11
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.simulation.variants, 5);
    assert_eq!(config.simulation.seed, Some(11));
    assert!(config.audit.enabled);
}

#[test]
fn test_out_of_range_file_values_fail_validation() {
    let config: Config = toml::from_str(
        r#"
        [simulation]
        initial_bankroll = 250
        variants = 5
        kelly_fraction_pct = 150
        bets = 20
        inflated_probability_pct = 3
        "#,
    )
    .unwrap();

    assert_eq!(
        config.simulation.validate(),
        Err(ConfigError::KellyFractionOutOfRange(150))
    );
}

#[test]
fn test_missing_simulation_section_rejected() {
    let result: Result<Config, _> = toml::from_str("[telemetry]\nlog_level = \"debug\"\n");
    assert!(result.is_err());
}
