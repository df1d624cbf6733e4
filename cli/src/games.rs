//! Game listing and lookup

use anyhow::{Result, bail};
use clap::Args;
use modkit_core::games::{GameService, GameSpec};

#[derive(Args)]
pub struct GamesArgs {
    /// Print the games as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GameArgs {
    /// Game id, short name or unique prefix of either
    pub query: String,
}

pub fn list(args: GamesArgs, service: &GameService) -> Result<()> {
    let games = service.supported_games();

    if args.json {
        let specs: Vec<&GameSpec> = games.iter().map(|g| g.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&specs)?);
        return Ok(());
    }

    if games.is_empty() {
        println!("No games configured.");
        return Ok(());
    }

    let id_width = games.iter().map(|g| g.id.len()).max().unwrap_or(0);
    let short_width = games.iter().map(|g| g.short_name.len()).max().unwrap_or(0);
    for game in games {
        println!(
            "{:id_width$}  {:short_width$}  {}",
            game.id, game.short_name, game.display_name
        );
    }
    Ok(())
}

pub fn show(args: GameArgs, service: &GameService) -> Result<()> {
    let game = match service.resolve(&args.query) {
        Ok(game) => game,
        Err(err) => bail!("{}", err),
    };

    println!("{}", game.display_name);
    println!("  Id:               {}", game.id);
    println!("  Short name:       {}", game.short_name);
    println!("  Nexus id:         {}", game.nexus_id);
    println!("  Mods folder:      {}", game.mods_folder.display());
    println!("  INI directory:    {}", game.inidir.display());
    for file in game.ini_files_in(&game.inidir) {
        println!("    {}", file.display());
    }
    if !game.additional_files.is_empty() {
        println!("  Additional files: {}", game.additional_files.join(", "));
    }
    Ok(())
}
