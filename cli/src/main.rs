//! modkit CLI - Inspect supported games and mod instances
//!
//! # Commands
//!
//! - `modkit games` - List supported games
//! - `modkit game <query>` - Show one game (id, short name or unique prefix)
//! - `modkit instance <file>` - Validate and summarize an instance info file
//! - `modkit config` - Show the effective configuration
//!
//! The games file comes from `--games`, else from `config.toml`
//! (`[games] file`), else from `games.json` in the data directory.

mod config_cmd;
mod games;
mod instance;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use modkit_core::config::{self, Config};
use modkit_core::games::{GameService, GameSource};
use tracing_subscriber::EnvFilter;

/// modkit CLI - Inspect supported games and mod instances
#[derive(Parser)]
#[command(name = "modkit")]
#[command(about = "Inspect supported games and mod instances")]
#[command(version)]
struct Cli {
    /// Path to games.json (overrides the configured file)
    #[arg(long, global = true)]
    games: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported games
    Games(games::GamesArgs),

    /// Show a single game
    Game(games::GameArgs),

    /// Validate and summarize an instance info JSON file
    Instance(instance::InstanceArgs),

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load();

    init_logging(&config.logging.level);

    match cli.command {
        Commands::Games(args) => games::list(args, registry(cli.games, &config)?),
        Commands::Game(args) => games::show(args, registry(cli.games, &config)?),
        Commands::Instance(args) => {
            registry(cli.games, &config)?;
            instance::execute(args)
        }
        Commands::Config => config_cmd::execute(&config, cli.games),
    }
}

/// `RUST_LOG` wins over the configured level; logs go to stderr so command
/// output stays machine-readable.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the game registry from the chosen games file.
fn registry(games: Option<PathBuf>, config: &Config) -> Result<&'static GameService> {
    let path = games_file(games, config)?;
    tracing::debug!("Loading games from {}", path.display());

    GameService::init(GameSource::File(path.clone()))
        .with_context(|| format!("Failed to load games from {}", path.display()))
}

fn games_file(games: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    games
        .or_else(|| config.games.games_file())
        .context("No games file configured and no data directory available")
}
