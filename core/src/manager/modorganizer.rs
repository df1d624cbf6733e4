//! Mod Organizer 2 instance identification

use std::path::{Path, PathBuf};
use std::sync::Arc;

use modkit_shared::MO2_INI_FILE_NAME;
use serde::{Deserialize, Serialize};

use super::game_ref;
use crate::games::GameSpec;

/// Identifies an MO2 instance and one of its profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mo2InstanceInfo {
    /// Display name of the instance.
    pub display_name: String,
    /// Primary game of the instance.
    #[serde(with = "game_ref")]
    pub game: Arc<GameSpec>,
    /// Selected profile of the instance.
    pub profile: String,
    /// Whether this is a global (AppData) instance rather than a portable one.
    pub is_global: bool,
    /// Base directory of the instance; contains its `ModOrganizer.ini`.
    pub base_folder: PathBuf,
    /// The instance's "mods" folder.
    pub mods_folder: PathBuf,
    /// The instance's "profiles" folder.
    pub profiles_folder: PathBuf,
    /// Whether MO2 itself should be installed into the instance when it is
    /// created. Only meaningful for portable instances.
    #[serde(skip_serializing, default = "default_true")]
    pub install_mo2: bool,
    /// Whether the instance deploys root files through the Root Builder
    /// plugin instead of copying them to the game folder.
    #[serde(skip_serializing, default = "default_true")]
    pub use_root_builder: bool,
}

fn default_true() -> bool {
    true
}

impl Mo2InstanceInfo {
    /// Path of the instance's `ModOrganizer.ini`.
    pub fn ini_path(&self) -> PathBuf {
        self.base_folder.join(MO2_INI_FILE_NAME)
    }

    /// Folder of the selected profile.
    pub fn profile_folder(&self) -> PathBuf {
        self.profiles_folder.join(&self.profile)
    }

    /// Where profile-local INI files live.
    pub fn instance_ini_dir(&self) -> PathBuf {
        self.profile_folder()
    }

    /// Where the game's additional files (e.g. `plugins.txt`) live.
    pub fn additional_files_folder(&self) -> PathBuf {
        self.profile_folder()
    }

    /// Paths of the game's additional files for this profile.
    pub fn additional_files(&self) -> Vec<PathBuf> {
        let folder = self.additional_files_folder();
        self.game
            .additional_files
            .iter()
            .map(|name| folder.join(name))
            .collect()
    }

    pub fn mods_path(&self) -> &Path {
        &self.mods_folder
    }

    /// `"<instance> > <profile>"`, the label MO2 instances are shown with.
    pub fn label(&self) -> String {
        format!("{} > {}", self.display_name, self.profile)
    }
}
