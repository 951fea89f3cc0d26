//! The `mathdrill history` command.

use std::path::PathBuf;

use anyhow::Result;

use mathdrill_core::history::HistoryStore;
use mathdrill_core::model::ModeKind;
use mathdrill_store::JsonFileHistory;

use crate::display;

pub fn execute(
    mode: Option<ModeKind>,
    format: String,
    history_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref(), history_path)?;
    let mode = mode.unwrap_or(config.default_mode);
    let history = JsonFileHistory::new(&config.history_path).query(mode);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        "text" => {
            if history.is_empty() {
                println!("No {mode} history yet.");
                return Ok(());
            }
            println!("{}", display::history_table(&history));
            display::print_trend(mode, &history);
        }
        other => anyhow::bail!("unknown format: {other}"),
    }

    Ok(())
}
