//! Instance info inspection

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use modkit_core::manager::InstanceInfo;
use modkit_shared::{MAX_INSTANCE_JSON_BYTES, read_text_with_limit};

#[derive(Args)]
pub struct InstanceArgs {
    /// Path to an instance info JSON file
    pub file: PathBuf,
}

/// Requires the game registry to be initialized.
pub fn execute(args: InstanceArgs) -> Result<()> {
    let json = read_text_with_limit(&args.file, MAX_INSTANCE_JSON_BYTES)?;
    let info: InstanceInfo = serde_json::from_str(&json)
        .with_context(|| format!("Invalid instance info in {}", args.file.display()))?;

    println!("{}", info.display_name());
    println!("  Mod manager: {}", info.mod_manager());
    println!("  Game:        {} ({})", info.game().display_name, info.game().id);

    match &info {
        InstanceInfo::ModOrganizer(mo2) => {
            let kind = if mo2.is_global { "global" } else { "portable" };
            println!("  Instance:    {} ({})", mo2.label(), kind);
            println!("  Base folder: {}", mo2.base_folder.display());
            println!("  Config:      {}", mo2.ini_path().display());
            println!("  Mods:        {}", mo2.mods_path().display());
            println!("  Profile:     {}", mo2.profile_folder().display());
            for file in mo2.additional_files() {
                println!("    {}", file.display());
            }
        }
        InstanceInfo::Vortex(profile) => {
            println!("  Profile id:  {}", profile.id);
        }
    }
    Ok(())
}
