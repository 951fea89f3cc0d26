//! mathdrill CLI: the terminal front end for the quiz engine.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mathdrill_core::model::ModeKind;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "mathdrill", version, about = "Timed mental-arithmetic quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session
    Play {
        #[command(flatten)]
        quiz: commands::QuizArgs,

        /// History file (overrides config and MATHDRILL_HISTORY)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show stored results for a mode
    History {
        /// Mode to show: marathon, sprint, survival
        #[arg(long)]
        mode: Option<ModeKind>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// History file (overrides config and MATHDRILL_HISTORY)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a generated problem batch without playing it
    Problems {
        #[command(flatten)]
        quiz: commands::QuizArgs,

        /// How many problems to print for sprint and survival
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mathdrill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            quiz,
            history,
            config,
        } => commands::play::execute(quiz, history, config).await,
        Commands::History {
            mode,
            format,
            history,
            config,
        } => commands::history::execute(mode, format, history, config),
        Commands::Problems {
            quiz,
            limit,
            format,
            config,
        } => commands::problems::execute(quiz, limit, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
