//! The `mathdrill play` command.
//!
//! Each stdin line is an explicit submit. A 100ms interval drives the
//! sprint countdown on the same task, so the session only ever has one
//! writer.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use mathdrill_core::evaluator::AnswerStatus;
use mathdrill_core::history::HistoryStore;
use mathdrill_core::quiz::{Quiz, SessionTicket};
use mathdrill_core::session::SessionState;
use mathdrill_store::JsonFileHistory;

use super::QuizArgs;
use crate::display;

const TICK_PERIOD: Duration = Duration::from_millis(100);

pub async fn execute(
    args: QuizArgs,
    history_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref(), history_path)?;
    let (mode, settings) = args.resolve(&config);
    let history = JsonFileHistory::new(&config.history_path);
    tracing::debug!("history file: {}", config.history_path.display());

    let mut quiz = Quiz::new(mode, settings, history, args.seed);
    let ticket = quiz.start(Instant::now());

    println!("mathdrill: {mode}, operation {}", quiz.settings().operation);
    println!("Type an answer and press Enter; q aborts.\n");
    show_prompt(&quiz)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.context("failed to read answer")?;
                let Some(line) = line else {
                    abort(&mut quiz, ticket, "Input closed");
                    return Ok(());
                };
                let input = line.trim();
                if matches!(input, "q" | "quit" | "abort") {
                    abort(&mut quiz, ticket, "Aborted");
                    return Ok(());
                }
                let status = quiz.submit(ticket, input, Instant::now());
                report_status(&quiz, status);
                if quiz.state() == SessionState::Active {
                    show_prompt(&quiz)?;
                }
            }
            _ = ticker.tick() => {
                quiz.tick(ticket, Instant::now());
                if quiz.state() == SessionState::Finished {
                    println!("\nTime's up!");
                }
            }
        }

        if quiz.state().is_terminal() {
            break;
        }
    }

    if let Some(session) = quiz.session() {
        display::print_report(mode, session.results());
    }
    println!();
    display::print_trend(mode, &quiz.mode_history());
    Ok(())
}

fn abort<H: HistoryStore>(quiz: &mut Quiz<H>, ticket: SessionTicket, reason: &str) {
    let answered = quiz.session().map_or(0, |s| s.results().len());
    quiz.abort(ticket);
    println!("\n{reason}, session discarded ({answered} answered, nothing saved).");
}

fn report_status<H: HistoryStore>(quiz: &Quiz<H>, status: AnswerStatus) {
    let last = quiz.session().and_then(|s| s.results().last());
    match (status, last) {
        (AnswerStatus::Pending, _) => println!("  enter a number (q to quit)"),
        (AnswerStatus::Correct, _) => println!("  correct"),
        (AnswerStatus::Wrong, Some(record)) => {
            println!("  wrong, {} = {}", record.problem, record.problem.answer)
        }
        (AnswerStatus::Wrong, None) => println!("  wrong"),
    }
}

fn show_prompt<H: HistoryStore>(quiz: &Quiz<H>) -> Result<()> {
    let Some(session) = quiz.session() else {
        return Ok(());
    };
    let Some(problem) = session.current_problem() else {
        return Ok(());
    };
    let line = display::prompt(
        problem,
        session.current_index(),
        session.mode().problem_limit(),
        session.remaining_display_secs(),
    );
    let mut stdout = std::io::stdout();
    write!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}
