//! Session analytics and reporting

use super::{SimulationResult, TerminationReason};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Summary statistics for a finished session
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub initial_bankroll: Decimal,
    pub final_bankroll: Decimal,
    /// Final minus initial bankroll
    pub net_pnl: Decimal,
    /// Bankroll change in percent
    pub return_pct: Decimal,
    /// Highest bankroll seen
    pub peak_bankroll: Decimal,
    /// Maximum drawdown from peak (absolute)
    pub max_drawdown: Decimal,
    /// Maximum drawdown from peak in percent
    pub max_drawdown_pct: Decimal,
    pub wins: usize,
    pub losses: usize,
    /// Share of settled bets won, in percent
    pub win_pct: Decimal,
    /// Share of settled bets lost, in percent
    pub loss_pct: Decimal,
    /// Settled bets
    pub total_bets: usize,
    pub skipped_rounds: usize,
    pub termination: TerminationReason,
}

impl SimulationSummary {
    /// Compute summary statistics from a session result
    pub fn from_result(result: &SimulationResult) -> Self {
        let wins = result.wins();
        let losses = result.losses();
        let total_bets = result.results_history.len();
        let (peak_bankroll, max_drawdown, max_drawdown_pct) =
            drawdown_stats(&result.bankroll_history);

        Self {
            initial_bankroll: result.initial_bankroll,
            final_bankroll: result.final_bankroll,
            net_pnl: result.final_bankroll.saturating_sub(result.initial_bankroll),
            return_pct: percent_change(result.initial_bankroll, result.final_bankroll),
            peak_bankroll,
            max_drawdown,
            max_drawdown_pct,
            wins,
            losses,
            win_pct: share_pct(wins, total_bets),
            loss_pct: share_pct(losses, total_bets),
            total_bets,
            skipped_rounds: result.skipped_rounds,
            termination: result.termination,
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               SIMULATION RESULTS
══════════════════════════════════════════════════════

BANKROLL
───────────────────────────────────────────────────────
Initial:          ${:.2}
Final:            ${:.2}
Net P&L:          {:+.2} ({:+.2}%)
Peak:             ${:.2}
Max Drawdown:     {:.2} ({:.2}%)

BETS
───────────────────────────────────────────────────────
Total Bets:       {}
Wins:             {} ({:.2}%)
Losses:           {} ({:.2}%)
Skipped Rounds:   {}
Outcome:          {}
══════════════════════════════════════════════════════
"#,
            self.initial_bankroll.round_dp(2),
            self.final_bankroll.round_dp(2),
            self.net_pnl.round_dp(2),
            self.return_pct,
            self.peak_bankroll.round_dp(2),
            self.max_drawdown.round_dp(2),
            self.max_drawdown_pct,
            self.total_bets,
            self.wins,
            self.win_pct,
            self.losses,
            self.loss_pct,
            self.skipped_rounds,
            self.termination,
        )
    }
}

/// Percentage change from `initial` to `current`, rounded to 2 decimals
///
/// Saturates at `Decimal::MAX`/`Decimal::MIN` for changes too large to represent.
pub fn percent_change(initial: Decimal, current: Decimal) -> Decimal {
    if initial == dec!(0) {
        return dec!(0);
    }
    let change = current.saturating_sub(initial);
    let ratio = change.checked_div(initial).unwrap_or(
        if change.is_sign_negative() == initial.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        },
    );
    ratio.saturating_mul(dec!(100)).round_dp(2)
}

/// `part` as a percentage of `total`, rounded to 2 decimals
pub fn share_pct(part: usize, total: usize) -> Decimal {
    if total == 0 {
        return dec!(0);
    }
    (Decimal::from(part) / Decimal::from(total) * dec!(100)).round_dp(2)
}

/// Peak bankroll plus the deepest drawdown from a running peak (absolute, percent)
fn drawdown_stats(history: &[Decimal]) -> (Decimal, Decimal, Decimal) {
    let mut peak = history.first().copied().unwrap_or_default();
    let mut max_drawdown = dec!(0);
    let mut max_drawdown_pct = dec!(0);

    for &value in history {
        if value > peak {
            peak = value;
        }
        let drawdown = peak - value;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
        if peak > dec!(0) {
            let pct = (drawdown / peak * dec!(100)).round_dp(2);
            if pct > max_drawdown_pct {
                max_drawdown_pct = pct;
            }
        }
    }

    (peak, max_drawdown, max_drawdown_pct)
}
