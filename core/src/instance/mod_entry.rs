//! Mods and their metadata

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use modkit_shared::MO2_SEPARATOR_SUFFIX;
use serde::{Deserialize, Serialize};

/// Suffix Mod Organizer 2 appends to files hidden by a conflict rule.
pub const HIDDEN_SUFFIX: &str = ".mohidden";

/// Kind of entry in a mod list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModType {
    #[default]
    Regular,
    /// A named divider in the mod list; carries no files of its own.
    Separator,
    /// Files written at runtime that do not belong to any mod.
    Overwrite,
}

/// Download metadata of a mod, as known to Nexus Mods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    pub mod_id: Option<u64>,
    pub file_id: Option<u64>,
    pub version: String,
    /// File name of the downloaded archive.
    pub file_name: Option<String>,
    /// Nexus id of the game the mod was made for.
    pub game_id: String,
}

impl Metadata {
    /// Metadata with only the version set; the version is normalized.
    pub fn with_version(version: &str) -> Self {
        Self {
            version: normalize_version(version),
            ..Self::default()
        }
    }
}

/// Strip redundant trailing `.0` components while more than two remain:
/// `"1.2.0.0"` becomes `"1.2"`, `"1.0"` stays `"1.0"`.
pub fn normalize_version(version: &str) -> String {
    let mut version = version.trim();
    while version.matches('.').count() > 1 {
        match version.strip_suffix(".0") {
            Some(stripped) => version = stripped,
            None => break,
        }
    }
    version.to_string()
}

/// Lower-cased, forward-slash key used to compare file paths across mods.
pub fn file_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

/// A mod within an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mod {
    /// Unique name of the mod within its instance (its folder name).
    pub name: String,
    pub display_name: String,
    /// Folder containing the mod's files.
    pub path: PathBuf,
    /// Where the files are deployed relative to the game's mods folder.
    /// `Some(".")` deploys into the game's root folder.
    pub deploy_path: Option<PathBuf>,
    pub metadata: Metadata,
    pub installed: bool,
    pub enabled: bool,
    pub mod_type: ModType,
    /// Files relative to `path`.
    pub files: Vec<PathBuf>,
    /// Names of mods that overwrite files of this mod, in load order.
    pub mod_conflicts: Vec<String>,
    /// File key -> name of the mod that wins the file, for files this mod
    /// has hidden.
    pub file_conflicts: BTreeMap<String, String>,
}

impl Mod {
    /// Create an installed, enabled mod without files or conflicts.
    ///
    /// Separator names lose their `_separator` suffix in the display name.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, mod_type: ModType) -> Self {
        let name = name.into();
        let display_name = match mod_type {
            ModType::Separator => name
                .strip_suffix(MO2_SEPARATOR_SUFFIX)
                .unwrap_or(&name)
                .to_string(),
            _ => name.clone(),
        };

        Self {
            name,
            display_name,
            path: path.into(),
            deploy_path: None,
            metadata: Metadata::default(),
            installed: true,
            enabled: true,
            mod_type,
            files: Vec::new(),
            mod_conflicts: Vec::new(),
            file_conflicts: BTreeMap::new(),
        }
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the mod deploys into the game's root folder.
    pub fn is_root_mod(&self) -> bool {
        self.deploy_path.as_deref() == Some(Path::new("."))
    }

    /// Whether `name` refers to this mod, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Hidden files whose real name differs from the stored one, mapped to
    /// the real name.
    ///
    /// `scripts/_wetskyuiconfig.pex.mohidden` -> `scripts/_wetskyuiconfig.pex`
    pub fn actual_files(&self) -> BTreeMap<PathBuf, PathBuf> {
        self.files
            .iter()
            .filter_map(|file| {
                let key = file_key(file);
                let real_key = key.strip_suffix(HIDDEN_SUFFIX)?;
                if !self.file_conflicts.contains_key(real_key) {
                    return None;
                }
                let raw = file.to_string_lossy();
                let real = &raw[..raw.len() - HIDDEN_SUFFIX.len()];
                Some((file.clone(), PathBuf::from(real)))
            })
            .collect()
    }
}
