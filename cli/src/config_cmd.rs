//! Effective configuration

use std::path::PathBuf;

use anyhow::Result;
use modkit_core::config::{self, Config};
use modkit_shared::PathVars;

pub fn execute(config: &Config, games_override: Option<PathBuf>) -> Result<()> {
    match config::config_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not found, using defaults)", path.display()),
        None => println!("# no config directory, using defaults"),
    }
    println!("{}", toml::to_string_pretty(config)?);

    let games = games_override.or_else(|| config.games.games_file());
    match games {
        Some(path) => println!("# games file: {}", path.display()),
        None => println!("# games file: <unavailable>"),
    }
    println!(
        "# MO2 global instances: {}",
        config.modorganizer.appdata_path(&PathVars::from_env()).display()
    );
    Ok(())
}
