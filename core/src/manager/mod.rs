//! Mod managers and instance identification
//!
//! A mod instance lives inside one of the supported mod managers. This
//! module names those managers ([`ModManager`]) and describes how a selected
//! instance is identified ([`InstanceInfo`]), independent of any GUI.
//!
//! Instance info is serialized as JSON with the game stored by id and the
//! manager stored under `mod_manager`:
//!
//! ```json
//! {
//!     "mod_manager": "Vortex",
//!     "display_name": "Default (BkIX54nayg)",
//!     "game": "skyrimse",
//!     "id": "BkIX54nayg"
//! }
//! ```

pub mod game_ref;
mod modorganizer;
mod vortex;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::games::GameSpec;

pub use modorganizer::Mo2InstanceInfo;
pub use vortex::ProfileInfo;

/// Supported mod managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModManager {
    Vortex,
    ModOrganizer,
}

impl ModManager {
    /// Internal identifier of the mod manager.
    pub fn id(&self) -> &'static str {
        match self {
            ModManager::Vortex => "vortex",
            ModManager::ModOrganizer => "modorganizer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModManager::Vortex => "Vortex",
            ModManager::ModOrganizer => "Mod Organizer 2",
        }
    }

    /// Name of the icon resource a GUI host should show for the manager.
    pub fn icon_name(&self) -> &'static str {
        match self {
            ModManager::Vortex => ":/icons/vortex.svg",
            ModManager::ModOrganizer => ":/icons/mo2.png",
        }
    }

    /// All mod managers, in the order a selector lists them.
    pub fn all() -> &'static [ModManager] {
        &[ModManager::Vortex, ModManager::ModOrganizer]
    }

    /// Parse an internal id or display name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.id().eq_ignore_ascii_case(s) || m.display_name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ModManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown mod manager '{}'", s))
    }
}

/// Identifies one instance within a mod manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mod_manager")]
pub enum InstanceInfo {
    #[serde(rename = "Mod Organizer 2")]
    ModOrganizer(Mo2InstanceInfo),
    #[serde(rename = "Vortex")]
    Vortex(ProfileInfo),
}

impl InstanceInfo {
    pub fn mod_manager(&self) -> ModManager {
        match self {
            InstanceInfo::ModOrganizer(_) => ModManager::ModOrganizer,
            InstanceInfo::Vortex(_) => ModManager::Vortex,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            InstanceInfo::ModOrganizer(info) => &info.display_name,
            InstanceInfo::Vortex(info) => &info.display_name,
        }
    }

    /// The primary game of the instance.
    pub fn game(&self) -> &Arc<GameSpec> {
        match self {
            InstanceInfo::ModOrganizer(info) => &info.game,
            InstanceInfo::Vortex(info) => &info.game,
        }
    }
}

impl From<Mo2InstanceInfo> for InstanceInfo {
    fn from(info: Mo2InstanceInfo) -> Self {
        InstanceInfo::ModOrganizer(info)
    }
}

impl From<ProfileInfo> for InstanceInfo {
    fn from(info: ProfileInfo) -> Self {
        InstanceInfo::Vortex(info)
    }
}
