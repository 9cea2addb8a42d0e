//! End-to-end simulation tests

use kelly_sim::audit::{AuditEntry, FileAuditSink, MemoryAuditSink};
use kelly_sim::config::SimulationConfig;
use kelly_sim::market::{OddsGenerator, ValueBetInjector, BOOKMAKER_MARGIN};
use kelly_sim::outcome::OutcomeResolver;
use kelly_sim::risk::{KellyCalculator, KellyOutcome};
use kelly_sim::simulation::{
    chart, session_rng, SimulationError, SimulationLoop, SimulationSummary, TerminationReason,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn session(bets: usize, seed: Option<u64>) -> SimulationConfig {
    SimulationConfig {
        initial_bankroll: 100,
        variants: 3,
        kelly_fraction_pct: 100,
        bets,
        inflated_probability_pct: 10,
        seed,
    }
}

#[test]
fn test_single_bet_session_end_to_end() {
    let mut sink = MemoryAuditSink::new();
    let mut simulation = SimulationLoop::from_config(session(1, None)).unwrap();
    let result = simulation.run(&mut sink).unwrap();

    assert!(result.final_bankroll >= Decimal::ZERO);
    assert_eq!(result.bankroll_history.len(), 2);
    assert_eq!(result.results_history.len(), 1);
    assert_eq!(result.wins() + result.losses(), 1);
}

#[test]
fn test_round_pipeline() {
    let mut rng = session_rng(Some(99));
    let odds = OddsGenerator::default().generate(5, &mut rng).unwrap();
    assert_eq!(odds.len(), 5);
    assert!((odds.overround() - BOOKMAKER_MARGIN).abs() < dec!(0.01));

    let injected = ValueBetInjector::from_percent(10)
        .inject(&odds, &mut rng)
        .unwrap();
    assert_eq!(injected.probabilities.options(), odds.options());

    let outcome = KellyCalculator::new().find_value_bet(&odds, &injected.probabilities);
    let KellyOutcome::ValueBetFound { fraction, option, .. } = outcome else {
        panic!("a 10% boost always creates a value bet");
    };
    assert!(fraction > Decimal::ZERO && fraction <= Decimal::ONE);
    assert!(odds.get(&option).is_some());

    let winner = OutcomeResolver::new()
        .resolve(&injected.probabilities, &mut rng)
        .unwrap();
    assert!(odds.get(&winner).is_some());
}

#[test]
fn test_audit_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("betting_log.txt");

    let mut sink = FileAuditSink::create(&path).unwrap();
    let result = SimulationLoop::from_config(session(5, Some(5)))
        .unwrap()
        .run(&mut sink)
        .unwrap();
    drop(sink);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].contains(" - INFO - Simulation started."));
    assert!(lines
        .last()
        .unwrap()
        .contains("Simulation ended (completed). Final bankroll:"));
    let bet_lines = lines.iter().filter(|l| l.contains("Bet #")).count();
    assert_eq!(bet_lines, result.rounds.len() + result.skipped_rounds);
}

#[test]
fn test_summary_and_charts_from_result() {
    let mut sink = MemoryAuditSink::new();
    let result = SimulationLoop::from_config(SimulationConfig {
        initial_bankroll: 1000,
        kelly_fraction_pct: 25,
        inflated_probability_pct: 5,
        ..session(40, Some(17))
    })
    .unwrap()
    .run(&mut sink)
    .unwrap();

    let summary = SimulationSummary::from_result(&result);
    assert_eq!(summary.total_bets, result.results_history.len());
    assert_eq!(summary.wins + summary.losses, summary.total_bets);
    assert_eq!(summary.final_bankroll, result.final_bankroll);

    let line_chart = chart::bankroll_chart(&result.bankroll_history, 60, 10);
    assert!(line_chart.contains("Bankroll Results:"));
    let bars = chart::win_loss_chart(summary.wins, summary.losses, 40);
    assert!(bars.contains("Win: "));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["termination"], "completed");
    assert_eq!(
        json["bankroll_history"].as_array().unwrap().len(),
        result.bankroll_history.len()
    );
}

#[test]
fn test_ruined_session_keeps_partial_history() {
    let mut sink = MemoryAuditSink::new();
    let result = SimulationLoop::from_config(SimulationConfig {
        initial_bankroll: 10,
        variants: 6,
        kelly_fraction_pct: 100,
        bets: 10_000,
        inflated_probability_pct: 100,
        seed: Some(3),
    })
    .unwrap()
    .run(&mut sink)
    .unwrap();

    assert_eq!(result.termination, TerminationReason::Ruined);
    assert!(result.is_ruined());
    assert_eq!(result.bankroll_history.len(), result.rounds.len() + 1);
    assert_eq!(result.results_history.last(), Some(&false));
    assert!(matches!(
        sink.entries().last(),
        Some(AuditEntry::SessionEnded {
            termination: TerminationReason::Ruined,
            ..
        })
    ));
}

#[test]
fn test_invalid_input_aborts_before_running() {
    let result = SimulationLoop::from_config(SimulationConfig {
        inflated_probability_pct: 0,
        ..session(1, None)
    });

    match result {
        Err(SimulationError::InvalidInput(e)) => {
            assert_eq!(e.to_string(), "Please enter a probability value between 1 and 100.")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("invalid config accepted"),
    }
}

#[test]
fn test_runaway_bankroll_stops_at_limit() {
    // One variant at the odds floor always wins, compounding ~0.9% per bet
    let mut sink = MemoryAuditSink::new();
    let result = SimulationLoop::from_config(SimulationConfig {
        initial_bankroll: 1000,
        variants: 1,
        kelly_fraction_pct: 100,
        bets: 10_000,
        inflated_probability_pct: 10,
        seed: Some(1),
    })
    .unwrap()
    .run(&mut sink)
    .unwrap();

    assert_eq!(result.termination, TerminationReason::BankrollLimit);
    assert!(result.rounds.len() < 10_000);
    assert_eq!(result.bankroll_history.len(), result.rounds.len() + 1);
    assert!(result.results_history.iter().all(|won| *won));
    assert!(result.final_bankroll > Decimal::MAX / dec!(2));

    let entries = sink.entries();
    assert!(matches!(
        entries[entries.len() - 2],
        AuditEntry::BankrollLimit { .. }
    ));

    let summary = SimulationSummary::from_result(&result);
    assert!(summary.format_table().contains("Outcome:          bankroll limit"));
    assert!(chart::bankroll_chart(&result.bankroll_history, 60, 10).contains("Final Bankroll:"));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["termination"], "bankroll_limit");
}
