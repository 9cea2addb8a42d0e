//! Simulation loop
//!
//! Plays rounds until the configured count is reached or the bankroll is ruined.
//! Each round: generate odds -> inject value bet -> Kelly -> stake -> draw
//! winner -> settle.

use super::{
    session_rng, RoundRecord, SimulationError, SimulationResult, SimulationState,
    TerminationReason,
};
use crate::audit::{AuditEntry, AuditSink};
use crate::config::SimulationConfig;
use crate::ledger::{BankrollLedger, LedgerError};
use crate::market::{OddsGenerator, Probabilities, ValueBetInjector};
use crate::outcome::OutcomeResolver;
use crate::risk::{KellyCalculator, KellyOutcome, StakeSizer};
use crate::telemetry::{increment_counter, set_gauge, CounterMetric, GaugeMetric};
use chrono::Utc;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// What happened in a single round
enum RoundOutcome {
    Settled(RoundRecord),
    Skipped,
    /// The bet was voided because settling it would overflow the bankroll
    LimitReached,
}

/// Runs a betting session headlessly
pub struct SimulationLoop<R: Rng> {
    config: SimulationConfig,
    odds: OddsGenerator,
    injector: ValueBetInjector,
    kelly: KellyCalculator,
    sizer: StakeSizer,
    resolver: OutcomeResolver,
    rng: R,
}

impl SimulationLoop<ChaCha8Rng> {
    /// Create a loop seeded from the config, or from OS entropy when no seed is set
    pub fn from_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rng = session_rng(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SimulationLoop<R> {
    /// Create a loop with an explicit random source
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self, SimulationError> {
        config.validate()?;

        Ok(Self {
            odds: OddsGenerator::default(),
            injector: ValueBetInjector::from_percent(config.inflated_probability_pct),
            kelly: KellyCalculator::new(),
            sizer: StakeSizer::new(config.kelly_multiplier()),
            resolver: OutcomeResolver::new(),
            config,
            rng,
        })
    }

    /// Run the session to completion or ruin
    pub fn run(&mut self, sink: &mut dyn AuditSink) -> Result<SimulationResult, SimulationError> {
        self.run_rounds(sink, Self::play_round)
    }

    /// Session bookkeeping around a per-round step
    fn run_rounds<F>(
        &mut self,
        sink: &mut dyn AuditSink,
        mut next_round: F,
    ) -> Result<SimulationResult, SimulationError>
    where
        F: FnMut(
            &mut Self,
            usize,
            &mut BankrollLedger,
            &mut dyn AuditSink,
        ) -> Result<RoundOutcome, SimulationError>,
    {
        let session_id = Uuid::new_v4();
        let started_at = Utc::now();
        let initial_bankroll = self.config.initial_bankroll();

        sink.record(&AuditEntry::SessionStarted {
            session_id,
            initial_bankroll,
            variants: self.config.variants,
            kelly_fraction_pct: self.config.kelly_fraction_pct,
            bets: self.config.bets,
            inflated_probability_pct: self.config.inflated_probability_pct,
        })?;
        tracing::info!(
            %session_id,
            %initial_bankroll,
            variants = self.config.variants,
            bets = self.config.bets,
            kelly_fraction_pct = self.config.kelly_fraction_pct,
            inflated_probability_pct = self.config.inflated_probability_pct,
            "Simulation started"
        );
        set_gauge(GaugeMetric::Bankroll, initial_bankroll);

        let mut ledger = BankrollLedger::new(initial_bankroll);
        let mut rounds = Vec::new();
        let mut skipped_rounds = 0;
        let mut played = 0;
        let mut state = SimulationState::Running;

        while state == SimulationState::Running {
            played += 1;
            increment_counter(CounterMetric::Rounds);

            state = match next_round(&mut *self, played, &mut ledger, &mut *sink)? {
                RoundOutcome::Settled(record) => {
                    rounds.push(record);
                    SimulationState::after_round(ledger.is_ruined(), played, self.config.bets)
                }
                RoundOutcome::Skipped => {
                    skipped_rounds += 1;
                    SimulationState::after_round(ledger.is_ruined(), played, self.config.bets)
                }
                RoundOutcome::LimitReached => {
                    SimulationState::Terminated(TerminationReason::BankrollLimit)
                }
            };
        }

        let termination = match state {
            SimulationState::Terminated(reason) => reason,
            SimulationState::Running => TerminationReason::Completed,
        };
        let (final_bankroll, bankroll_history, results_history) = ledger.into_parts();

        if termination == TerminationReason::Ruined {
            sink.record(&AuditEntry::Ruined {
                round: played,
                bankroll: final_bankroll,
            })?;
            tracing::warn!(round = played, %final_bankroll, "Bankroll ruined");
        }
        sink.record(&AuditEntry::SessionEnded {
            final_bankroll,
            termination,
        })?;
        sink.flush()?;

        tracing::info!(
            %session_id,
            %final_bankroll,
            %termination,
            rounds = played,
            skipped_rounds,
            "Simulation ended"
        );

        Ok(SimulationResult {
            session_id,
            started_at,
            finished_at: Utc::now(),
            initial_bankroll,
            final_bankroll,
            bankroll_history,
            results_history,
            rounds,
            skipped_rounds,
            termination,
        })
    }

    fn play_round(
        &mut self,
        round: usize,
        ledger: &mut BankrollLedger,
        sink: &mut dyn AuditSink,
    ) -> Result<RoundOutcome, SimulationError> {
        let odds = self.odds.generate(self.config.variants, &mut self.rng)?;
        let injected = self.injector.inject(&odds, &mut self.rng)?;
        tracing::trace!(round, boosted = %injected.boosted, "Market ready");

        let outcome = self.kelly.find_value_bet(&odds, &injected.probabilities);
        self.settle_round(round, outcome, &injected.probabilities, ledger, sink)
    }

    /// Act on a round's Kelly decision: skip it, or stake, draw and settle
    fn settle_round(
        &mut self,
        round: usize,
        outcome: KellyOutcome,
        probabilities: &Probabilities,
        ledger: &mut BankrollLedger,
        sink: &mut dyn AuditSink,
    ) -> Result<RoundOutcome, SimulationError> {
        let (kelly, option, option_odds) = match outcome {
            KellyOutcome::ValueBetFound {
                fraction,
                option,
                odds,
            } => (fraction, option, odds),
            KellyOutcome::NoValueBet => {
                sink.record(&AuditEntry::NoValueBet { round })?;
                increment_counter(CounterMetric::SkippedRounds);
                tracing::warn!(round, "No value bet found, skipping round");
                return Ok(RoundOutcome::Skipped);
            }
        };

        let stake = self.sizer.stake(ledger.bankroll(), kelly);
        let winner = self.resolver.resolve(probabilities, &mut self.rng)?;
        let won = winner == option;

        let settlement = match ledger.settle(stake, option_odds, won, sink) {
            Ok(settlement) => settlement,
            Err(LedgerError::Overflow { bankroll, .. }) => {
                sink.record(&AuditEntry::BankrollLimit { round, bankroll })?;
                tracing::warn!(round, %bankroll, %stake, "Bankroll limit reached, stopping");
                return Ok(RoundOutcome::LimitReached);
            }
            Err(LedgerError::Audit(e)) => return Err(e.into()),
        };

        let record = RoundRecord {
            round,
            probability: probabilities.get(&option).unwrap_or_default(),
            option,
            odds: option_odds,
            kelly,
            kelly_multiplier: self.sizer.multiplier,
            stake,
            winner,
            won,
            bankroll: settlement.bankroll,
        };
        sink.record(&AuditEntry::Round(record.clone()))?;

        increment_counter(if won {
            CounterMetric::Wins
        } else {
            CounterMetric::Losses
        });
        set_gauge(GaugeMetric::Stake, stake);
        set_gauge(GaugeMetric::Bankroll, settlement.bankroll);
        tracing::debug!(
            round,
            option = %record.option,
            odds = %record.odds,
            kelly = %kelly,
            stake = %stake,
            winner = %record.winner,
            won,
            bankroll = %settlement.bankroll,
            "Round settled"
        );

        Ok(RoundOutcome::Settled(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditSink;
    use rand::SeedableRng;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn config(bets: usize) -> SimulationConfig {
        SimulationConfig {
            initial_bankroll: 100,
            variants: 3,
            kelly_fraction_pct: 100,
            bets,
            inflated_probability_pct: 10,
            seed: Some(42),
        }
    }

    #[test]
    fn test_single_bet_session() {
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::from_config(config(1)).unwrap();
        let result = sim.run(&mut sink).unwrap();

        assert!(result.final_bankroll >= Decimal::ZERO);
        assert_eq!(result.bankroll_history.len(), 2);
        assert_eq!(result.results_history.len(), 1);
        assert_eq!(result.rounds.len(), 1);
        assert_eq!(result.bankroll_history[0], dec!(100));
        assert_eq!(result.termination, TerminationReason::Completed);
    }

    #[test]
    fn test_history_tracks_rounds() {
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::from_config(SimulationConfig {
            kelly_fraction_pct: 25,
            inflated_probability_pct: 5,
            ..config(50)
        })
        .unwrap();
        let result = sim.run(&mut sink).unwrap();

        let settled = result.rounds.len();
        assert_eq!(settled + result.skipped_rounds, 50);
        assert_eq!(result.bankroll_history.len(), settled + 1);
        assert_eq!(result.results_history.len(), settled);
        assert_eq!(result.bankroll_history.last(), Some(&result.final_bankroll));
        for (record, snapshot) in result.rounds.iter().zip(&result.bankroll_history[1..]) {
            assert_eq!(record.bankroll, *snapshot);
        }
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let run = || {
            let mut sink = MemoryAuditSink::new();
            SimulationLoop::from_config(config(30))
                .unwrap()
                .run(&mut sink)
                .unwrap()
        };

        let first = run();
        let second = run();
        assert_eq!(first.bankroll_history, second.bankroll_history);
        assert_eq!(first.results_history, second.results_history);
        assert_eq!(first.rounds, second.rounds);
    }

    #[test]
    fn test_ruin_stops_early() {
        // Full Kelly on a 100% boost stakes nearly everything every round
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::with_rng(
            SimulationConfig {
                initial_bankroll: 10,
                variants: 6,
                kelly_fraction_pct: 100,
                bets: 10_000,
                inflated_probability_pct: 100,
                seed: None,
            },
            ChaCha8Rng::seed_from_u64(7),
        )
        .unwrap();
        let result = sim.run(&mut sink).unwrap();

        assert_eq!(result.termination, TerminationReason::Ruined);
        assert!(result.rounds.len() < 10_000);
        assert!(result.final_bankroll <= Decimal::ZERO);
        assert_eq!(result.bankroll_history.len(), result.rounds.len() + 1);
        assert!(sink
            .entries()
            .iter()
            .any(|e| matches!(e, AuditEntry::Ruined { .. })));
    }

    #[test]
    fn test_audit_markers() {
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::from_config(config(3)).unwrap();
        let result = sim.run(&mut sink).unwrap();

        let entries = sink.entries();
        assert!(matches!(entries.first(), Some(AuditEntry::SessionStarted { .. })));
        assert!(matches!(entries.last(), Some(AuditEntry::SessionEnded { .. })));

        let round_lines = entries
            .iter()
            .filter(|e| matches!(e, AuditEntry::Round(_)))
            .count();
        let settlement_lines = entries
            .iter()
            .filter(|e| matches!(e, AuditEntry::Settlement(_)))
            .count();
        assert_eq!(round_lines, result.rounds.len());
        assert_eq!(settlement_lines, result.rounds.len());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SimulationLoop::from_config(SimulationConfig {
            kelly_fraction_pct: 5,
            ..config(1)
        });
        assert!(matches!(result, Err(SimulationError::InvalidInput(_))));
    }

    #[test]
    fn test_stakes_follow_kelly_multiplier() {
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::from_config(SimulationConfig {
            initial_bankroll: 1000,
            kelly_fraction_pct: 50,
            ..config(1)
        })
        .unwrap();
        let result = sim.run(&mut sink).unwrap();

        let record = &result.rounds[0];
        let expected = (dec!(1000) * record.kelly * dec!(0.5)).round_dp(2);
        assert_eq!(record.stake, expected);
        assert_eq!(record.kelly_multiplier, dec!(0.5));
    }

    #[test]
    fn test_no_value_bet_round_is_skipped() {
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::from_config(config(4)).unwrap();
        let result = sim
            .run_rounds(&mut sink, |sim, round, ledger, sink| {
                if round != 2 {
                    return sim.play_round(round, ledger, sink);
                }
                let history = ledger.history().to_vec();
                let results = ledger.results().to_vec();
                let outcome = sim.settle_round(
                    round,
                    KellyOutcome::NoValueBet,
                    &Probabilities::new(),
                    ledger,
                    sink,
                )?;
                assert_eq!(ledger.history(), history.as_slice());
                assert_eq!(ledger.results(), results.as_slice());
                Ok(outcome)
            })
            .unwrap();

        assert_eq!(result.termination, TerminationReason::Completed);
        assert_eq!(result.skipped_rounds, 1);
        let played: Vec<usize> = result.rounds.iter().map(|r| r.round).collect();
        assert_eq!(played, vec![1, 3, 4]);
        assert_eq!(result.bankroll_history.len(), 4);
        assert_eq!(result.results_history.len(), 3);
        assert!(sink.entries().contains(&AuditEntry::NoValueBet { round: 2 }));
        assert!(sink
            .lines()
            .iter()
            .any(|l| l.as_str() == "Bet #2: No value bet found. Round skipped"));
    }

    #[test]
    fn test_skipped_final_round_still_completes() {
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::from_config(config(2)).unwrap();
        let result = sim
            .run_rounds(&mut sink, |sim, round, ledger, sink| {
                sim.settle_round(round, KellyOutcome::NoValueBet, &Probabilities::new(), ledger, sink)
            })
            .unwrap();

        assert_eq!(result.termination, TerminationReason::Completed);
        assert_eq!(result.skipped_rounds, 2);
        assert!(result.rounds.is_empty());
        assert_eq!(result.bankroll_history, vec![dec!(100)]);
        assert_eq!(result.final_bankroll, dec!(100));
    }

    #[test]
    fn test_overflowing_win_stops_at_bankroll_limit() {
        let mut sink = MemoryAuditSink::new();
        let mut sim = SimulationLoop::from_config(config(3)).unwrap();
        let result = sim
            .run_rounds(&mut sink, |sim, round, ledger, sink| {
                if round == 2 {
                    *ledger = BankrollLedger::new(Decimal::MAX - dec!(5));
                }
                let outcome = KellyOutcome::ValueBetFound {
                    fraction: dec!(0.5),
                    option: "Variant A".to_string(),
                    odds: dec!(3.0),
                };
                let probabilities: Probabilities = [("Variant A", dec!(1))].into_iter().collect();
                sim.settle_round(round, outcome, &probabilities, ledger, sink)
            })
            .unwrap();

        assert_eq!(result.termination, TerminationReason::BankrollLimit);
        assert_eq!(result.rounds.len(), 1);
        assert_eq!(result.final_bankroll, Decimal::MAX - dec!(5));
        assert_eq!(result.bankroll_history, vec![Decimal::MAX - dec!(5)]);
        let entries = sink.entries();
        assert!(matches!(
            entries[entries.len() - 2],
            AuditEntry::BankrollLimit { round: 2, .. }
        ));
    }
}
