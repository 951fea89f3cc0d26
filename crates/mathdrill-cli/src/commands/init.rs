//! The `mathdrill init` command.

use std::path::Path;

use anyhow::Result;

use mathdrill_core::config::SAMPLE_CONFIG;

pub fn execute() -> Result<()> {
    let path = Path::new("mathdrill.toml");
    if path.exists() {
        println!("mathdrill.toml already exists, skipping.");
        return Ok(());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    println!("Created mathdrill.toml");

    println!("\nNext steps:");
    println!("  1. Edit mathdrill.toml to pick your default mode and operation");
    println!("  2. Run: mathdrill play");
    println!("  3. Run: mathdrill history --mode marathon");

    Ok(())
}
