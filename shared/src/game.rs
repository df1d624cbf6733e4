//! Game specification records.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::ids::game_id_key;
use crate::paths::PathVars;

/// Specification of one supported game.
///
/// Stored as one element of the `games.json` array:
///
/// ```json
/// {
///     "id": "skyrimse",
///     "display_name": "Skyrim Special Edition",
///     "short_name": "SkyrimSE",
///     "nexus_id": "skyrimspecialedition",
///     "inidir": "%DOCUMENTS%/My Games/Skyrim Special Edition",
///     "inifiles": ["Skyrim.ini", "SkyrimPrefs.ini", "SkyrimCustom.ini"],
///     "mods_folder": "Data"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameSpec {
    /// Game identifier, matching the one Vortex uses (e.g. `"skyrimse"`).
    pub id: String,
    /// Display name (e.g. `"Skyrim Special Edition"`).
    pub display_name: String,
    /// Short name (e.g. `"SkyrimSE"`), used by Mod Organizer 2 metadata.
    pub short_name: String,
    /// Name of the game's Nexus Mods page (e.g. `"skyrimspecialedition"`).
    pub nexus_id: String,
    /// The game's INI directory. `%VAR%` placeholders are resolved on load.
    pub inidir: PathBuf,
    /// INI files relative to `inidir`. `%VAR%` placeholders are resolved on load.
    pub inifiles: Vec<PathBuf>,
    /// Default mods folder, relative to the game's install directory.
    pub mods_folder: PathBuf,
    /// Extra files relative to a mod manager's profile folder.
    #[serde(default)]
    pub additional_files: Vec<String>,
}

impl GameSpec {
    /// Returns a copy with every `%VAR%` in `inidir` and `inifiles` resolved.
    pub fn resolved(mut self, vars: &PathVars) -> Self {
        self.inidir = vars.resolve(&self.inidir);
        self.inifiles = self.inifiles.iter().map(|file| vars.resolve(file)).collect();
        self
    }

    /// Absolute paths of the game's INI files inside `ini_dir`.
    pub fn ini_files_in(&self, ini_dir: &Path) -> Vec<PathBuf> {
        self.inifiles.iter().map(|file| ini_dir.join(file)).collect()
    }

    /// Whether `id` names this game, ignoring case.
    pub fn matches_id(&self, id: &str) -> bool {
        game_id_key(&self.id) == game_id_key(id)
    }
}

// Identity is the naming quadruple; paths are per-user detail.
impl PartialEq for GameSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.display_name == other.display_name
            && self.short_name == other.short_name
            && self.nexus_id == other.nexus_id
    }
}

impl Eq for GameSpec {}

impl Hash for GameSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.display_name.hash(state);
        self.short_name.hash(state);
        self.nexus_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKYRIMSE: &str = r#"{
        "id": "skyrimse",
        "display_name": "Skyrim Special Edition",
        "short_name": "SkyrimSE",
        "nexus_id": "skyrimspecialedition",
        "inidir": "%DOCUMENTS%/My Games/Skyrim Special Edition",
        "inifiles": ["Skyrim.ini", "SkyrimPrefs.ini"],
        "mods_folder": "Data"
    }"#;

    #[test]
    fn test_parse_defaults_additional_files() {
        let game: GameSpec = serde_json::from_str(SKYRIMSE).unwrap();
        assert_eq!(game.id, "skyrimse");
        assert_eq!(game.short_name, "SkyrimSE");
        assert!(game.additional_files.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = SKYRIMSE.replace("\"mods_folder\"", "\"bogus\": 1, \"mods_folder\"");
        assert!(serde_json::from_str::<GameSpec>(&json).is_err());
    }

    #[test]
    fn test_resolved_paths() {
        let vars = PathVars::new().with("DOCUMENTS", "/docs");
        let game: GameSpec = serde_json::from_str::<GameSpec>(SKYRIMSE).unwrap().resolved(&vars);

        assert_eq!(game.inidir, PathBuf::from("/docs/My Games/Skyrim Special Edition"));
        assert_eq!(
            game.ini_files_in(&game.inidir),
            vec![
                PathBuf::from("/docs/My Games/Skyrim Special Edition/Skyrim.ini"),
                PathBuf::from("/docs/My Games/Skyrim Special Edition/SkyrimPrefs.ini"),
            ]
        );
    }

    #[test]
    fn test_matches_id_ignores_case() {
        let mut game: GameSpec = serde_json::from_str(SKYRIMSE).unwrap();
        assert!(game.matches_id("SKYRIMSE"));
        assert!(!game.matches_id("skyrim"));

        game.id = "élden".to_string();
        assert!(game.matches_id("ÉLDEN"));
    }

    #[test]
    fn test_equality_ignores_paths() {
        let a: GameSpec = serde_json::from_str(SKYRIMSE).unwrap();
        let mut b = a.clone();
        b.inidir = PathBuf::from("/elsewhere");
        assert_eq!(a, b);

        b.nexus_id = "skyrim".to_string();
        assert_ne!(a, b);
    }
}
