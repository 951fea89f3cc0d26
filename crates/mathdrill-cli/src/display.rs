//! Terminal rendering of problems, results, and history.

use comfy_table::{Cell, Table};

use mathdrill_core::model::{AnswerRecord, ModeKind, Problem, SessionSummary};
use mathdrill_core::statistics::{HistoryTrend, SessionReport};

/// Prompt line for the current problem, with the countdown in sprint.
pub fn prompt(
    problem: &Problem,
    position: usize,
    total: Option<usize>,
    remaining: Option<u64>,
) -> String {
    let counter = match (remaining, total) {
        (Some(secs), _) => format!("[{secs}s]"),
        (None, Some(total)) => format!("[{}/{}]", position + 1, total),
        (None, None) => format!("[#{}]", position + 1),
    };
    format!("{counter} {problem} = ")
}

pub fn print_report(mode: ModeKind, results: &[AnswerRecord]) {
    let Some(report) = SessionReport::from_results(results) else {
        println!("\nNo answers recorded.");
        return;
    };

    println!("\nSession complete ({mode})");
    println!("  Score: {} / {}", report.score, report.total_questions);
    println!("  Total time: {}s", report.total_time.round());
    println!("  Avg per question: {:.1}s", report.avg_time);

    let mut table = Table::new();
    table.set_header(vec!["#", "Problem", "Answer", "You", "Result", "Time"]);
    for (i, r) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(r.problem.to_string()),
            Cell::new(r.problem.answer),
            Cell::new(&r.user_answer),
            Cell::new(if r.correct { "OK" } else { "WRONG" }),
            Cell::new(format!("{:.1}s", r.time)),
        ]);
    }
    println!("\n{table}");
}

pub fn print_trend(mode: ModeKind, history: &[SessionSummary]) {
    let Some(trend) = HistoryTrend::from_history(history) else {
        println!("No {mode} history yet.");
        return;
    };
    if !trend.is_plottable() {
        println!("Play more {mode} games to see your trend.");
        return;
    }
    let direction = match trend.delta_avg_time {
        Some(delta) if delta < 0.0 => format!("{:.2}s faster than last game", -delta),
        Some(delta) if delta > 0.0 => format!("{delta:.2}s slower than last game"),
        _ => "same pace as last game".to_string(),
    };
    println!(
        "Trend over {} {mode} games: best score {}, fastest avg {:.2}s, latest avg {:.2}s ({direction})",
        trend.games, trend.best_score, trend.fastest_avg_time, trend.latest_avg_time
    );
}

pub fn history_table(history: &[SessionSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Game", "Date", "Score", "Avg time"]);
    for (i, s) in history.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(s.timestamp.format("%Y-%m-%d %H:%M")),
            Cell::new(format!("{} / {}", s.score, s.total_questions)),
            Cell::new(format!("{:.2}s", s.avg_time)),
        ]);
    }
    table
}
