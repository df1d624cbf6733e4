use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Instance;

/// An executable launched through a mod instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub display_name: String,
    /// Name of the mod the executable ships with, if any.
    pub mod_name: Option<String>,
    /// Executable path, relative to the owning mod or the game folder when
    /// either applies.
    pub executable: PathBuf,
    pub commandline_args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub is_in_game_dir: bool,
}

impl Tool {
    pub fn new(display_name: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            mod_name: None,
            executable: executable.into(),
            commandline_args: Vec::new(),
            working_dir: None,
            is_in_game_dir: false,
        }
    }

    /// Resolve the executable against the owning mod's folder, the game
    /// folder, or neither.
    ///
    /// A tool whose mod is no longer part of `instance` falls back to the
    /// game folder rules.
    pub fn full_executable_path(&self, instance: &Instance) -> PathBuf {
        if let Some(owner) = self.mod_name.as_deref().and_then(|name| instance.mod_by_name(name)) {
            return owner.path.join(&self.executable);
        }
        if self.is_in_game_dir {
            return instance.game_folder.join(&self.executable);
        }
        self.executable.clone()
    }
}
