//! Text charts for the terminal
//!
//! Bankroll evolution as a line chart and wins/losses as a bar chart.

use super::analytics::{percent_change, share_pct};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt::Write;

const POINT: char = '*';
const BAR: char = '#';

/// Line chart of bankroll over the number of bets
///
/// Long histories are sampled down to `width` columns.
pub fn bankroll_chart(history: &[Decimal], width: usize, height: usize) -> String {
    let mut out = String::new();
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return out;
    };

    let _ = writeln!(out, "Bankroll Evolution Over Time");
    let _ = writeln!(
        out,
        "Bankroll Results: {:.2}%    Final Bankroll: ${:.2}",
        percent_change(*first, *last),
        last.round_dp(2)
    );

    let width = width.max(1);
    let height = height.max(2);
    let columns = history.len().min(width);
    let samples: Vec<f64> = (0..columns)
        .map(|col| {
            let index = if columns > 1 {
                col * (history.len() - 1) / (columns - 1)
            } else {
                0
            };
            history[index].to_f64().unwrap_or_default()
        })
        .collect();

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let row_of = |value: f64| -> usize {
        if span <= f64::EPSILON {
            return (height - 1) / 2;
        }
        (((value - min) / span) * (height - 1) as f64).round() as usize
    };
    let rows: Vec<usize> = samples.iter().map(|v| row_of(*v)).collect();

    let label_width = format!("{max:.2}").len().max(format!("{min:.2}").len());
    for row in (0..height).rev() {
        let label = if row == height - 1 {
            format!("{max:.2}")
        } else if row == 0 {
            format!("{min:.2}")
        } else {
            String::new()
        };
        let line: String = rows
            .iter()
            .map(|r| if *r == row { POINT } else { ' ' })
            .collect();
        let _ = writeln!(out, "{label:>label_width$} |{}", line.trim_end());
    }
    let _ = writeln!(out, "{:>label_width$} +{}", "", "-".repeat(columns));
    let _ = writeln!(
        out,
        "{:>label_width$}  Number of Bets: 0..{}",
        "",
        history.len() - 1
    );

    out
}

/// Horizontal bar chart of wins and losses
pub fn win_loss_chart(wins: usize, losses: usize, width: usize) -> String {
    let total = wins + losses;
    let longest = wins.max(losses).max(1);
    let bar = |count: usize| BAR.to_string().repeat(count * width / longest);

    let mut out = String::new();
    let _ = writeln!(out, "Wins and Losses");
    let _ = writeln!(
        out,
        "Win: {:.2}% / Loss: {:.2}%",
        share_pct(wins, total),
        share_pct(losses, total)
    );
    let _ = writeln!(out, "Wins   | {} {wins}", bar(wins));
    let _ = writeln!(out, "Losses | {} {losses}", bar(losses));
    out
}
