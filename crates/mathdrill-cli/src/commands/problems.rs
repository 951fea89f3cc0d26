//! The `mathdrill problems` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use mathdrill_core::history::MemoryHistory;
use mathdrill_core::quiz::Quiz;

use super::QuizArgs;

/// Print the problems `play` would present with the same options and seed.
pub fn execute(
    args: QuizArgs,
    limit: usize,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref(), None)?;
    let (mode, settings) = args.resolve(&config);

    let mut quiz = Quiz::new(mode, settings, MemoryHistory::new(), args.seed);
    quiz.start(Instant::now());
    let Some(session) = quiz.session() else {
        anyhow::bail!("failed to start a session");
    };

    let take = session.mode().problem_limit().unwrap_or(limit);
    let problems = &session.problems()[..take.min(session.problem_count())];

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(problems)?);
        }
        "text" => {
            for (i, p) in problems.iter().enumerate() {
                println!("{:>3}. {p} = {}", i + 1, p.answer);
            }
        }
        other => anyhow::bail!("unknown format: {other}"),
    }

    Ok(())
}
