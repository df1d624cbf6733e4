//! Mod instances
//!
//! An [`Instance`] is the in-memory view of a configured set of mods for one
//! game: its mods in priority order, its tools and the conflicts between the
//! mods' files. Reading instances from a mod manager is up to the host;
//! this module only models them.

mod loadorder;
mod mod_entry;
mod tool;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use modkit_shared::GameSpec;
use serde::{Deserialize, Serialize};

pub use mod_entry::{HIDDEN_SUFFIX, Metadata, Mod, ModType, file_key, normalize_version};
pub use tool::Tool;

/// Lower-cased file path -> names of the mods containing it, in instance order.
pub type FileIndex = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub display_name: String,
    pub game_folder: PathBuf,
    /// Mods in priority order; later mods overwrite earlier ones.
    pub mods: Vec<Mod>,
    pub tools: Vec<Tool>,
    /// Whether the mod order is user-defined (MO2) rather than derived from
    /// conflict rules (Vortex).
    pub order_matters: bool,
    pub separate_ini_files: bool,
    pub separate_save_games: bool,
}

impl Instance {
    pub fn new(display_name: impl Into<String>, game_folder: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            game_folder: game_folder.into(),
            mods: Vec::new(),
            tools: Vec::new(),
            order_matters: true,
            separate_ini_files: false,
            separate_save_games: false,
        }
    }

    /// Look up a mod by name, ignoring case.
    pub fn mod_by_name(&self, name: &str) -> Option<&Mod> {
        self.mods.iter().find(|m| m.is_named(name))
    }

    pub fn mod_by_name_mut(&mut self, name: &str) -> Option<&mut Mod> {
        self.mods.iter_mut().find(|m| m.is_named(name))
    }

    /// Whether a mod with the same name is installed in this instance.
    pub fn is_mod_installed(&self, m: &Mod) -> bool {
        self.installed_mod(m).is_some()
    }

    /// The installed counterpart of `m` in this instance.
    pub fn installed_mod(&self, m: &Mod) -> Option<&Mod> {
        self.mod_by_name(&m.name).filter(|installed| installed.installed)
    }

    /// Add a mod taken from another instance.
    ///
    /// If it is already installed here, its conflicts are merged into the
    /// installed copy and the mod is enabled; otherwise it is appended.
    pub fn merge_mod(&mut self, m: &Mod) {
        match self
            .mods
            .iter_mut()
            .find(|installed| installed.installed && installed.is_named(&m.name))
        {
            Some(installed) => {
                for name in &m.mod_conflicts {
                    if !installed.mod_conflicts.contains(name) {
                        installed.mod_conflicts.push(name.clone());
                    }
                }
                for (file, winner) in &m.file_conflicts {
                    installed.file_conflicts.insert(file.clone(), winner.clone());
                }
                installed.enabled = m.enabled;
            }
            None => {
                tracing::debug!("Adding mod '{}' to instance '{}'", m.name, self.display_name);
                self.mods.push(m.clone());
            }
        }
    }

    /// Add a tool unless an identical one exists.
    pub fn add_tool(&mut self, tool: Tool) {
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
    }

    /// The mod whose folder contains `path`.
    pub fn mod_for_path(&self, path: &Path) -> Option<&Mod> {
        self.mods.iter().find(|m| path.starts_with(&m.path))
    }

    /// Index the files of all mods. Files whose name is in `blacklist`
    /// (compared case-insensitively) are skipped.
    pub fn index_files(&self, blacklist: &[String]) -> FileIndex {
        let mut index = FileIndex::new();
        for m in &self.mods {
            for file in &m.files {
                if is_blacklisted(file, blacklist) {
                    continue;
                }
                index.entry(file_key(file)).or_default().push(m.name.clone());
            }
        }
        index
    }

    /// Recompute `mod_conflicts` and `file_conflicts` of every mod from the
    /// files they contain.
    ///
    /// A mod is overwritten by every later mod that contains one of its
    /// files. Hidden files (`*.mohidden`) record the mod that wins the real
    /// file.
    pub fn compute_conflicts(&mut self, blacklist: &[String]) {
        let index = self.index_files(blacklist);

        let mut mod_conflicts: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut file_conflicts: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for (file, owners) in &index {
            for (i, owner) in owners.iter().enumerate() {
                let overwriting = mod_conflicts.entry(owner.clone()).or_default();
                for winner in &owners[i + 1..] {
                    if winner != owner && !overwriting.contains(winner) {
                        overwriting.push(winner.clone());
                    }
                }
            }

            let Some(real) = file.strip_suffix(HIDDEN_SUFFIX) else {
                continue;
            };
            let Some(winner) = index.get(real).and_then(|real_owners| real_owners.last()) else {
                continue;
            };
            for owner in owners {
                file_conflicts
                    .entry(owner.clone())
                    .or_default()
                    .insert(real.to_string(), winner.clone());
            }
        }

        for m in &mut self.mods {
            m.mod_conflicts = mod_conflicts.remove(&m.name).unwrap_or_default();
            m.file_conflicts = file_conflicts.remove(&m.name).unwrap_or_default();
        }

        tracing::debug!(
            "Computed conflicts for {} files in instance '{}'",
            index.len(),
            self.display_name
        );
    }

    /// Overwriting mod -> mods it overwrites.
    pub fn reversed_conflicts(&self) -> BTreeMap<String, Vec<String>> {
        let mut reversed: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for m in &self.mods {
            for winner in &m.mod_conflicts {
                let overwritten = reversed.entry(winner.clone()).or_default();
                if !overwritten.contains(&m.name) {
                    overwritten.push(m.name.clone());
                }
            }
        }
        reversed
    }

    /// Mods in the order they should be deployed.
    pub fn loadorder(&self) -> Vec<&Mod> {
        self.get_loadorder(self.order_matters)
    }

    /// With `order_matters` the instance order is returned unchanged;
    /// otherwise mods are sorted so overwritten mods precede the mods that
    /// overwrite them.
    pub fn get_loadorder(&self, order_matters: bool) -> Vec<&Mod> {
        if order_matters {
            return self.mods.iter().collect();
        }
        loadorder::sort_by_conflicts(&self.mods)
    }

    /// Folder the game's INI files are read from.
    pub fn ini_dir(&self, game: &GameSpec, instance_ini_dir: &Path) -> PathBuf {
        if self.separate_ini_files {
            instance_ini_dir.to_path_buf()
        } else {
            game.inidir.clone()
        }
    }

    /// Paths of the game's INI files for this instance.
    pub fn ini_files(&self, game: &GameSpec, instance_ini_dir: &Path) -> Vec<PathBuf> {
        game.ini_files_in(&self.ini_dir(game, instance_ini_dir))
    }
}

fn is_blacklisted(file: &Path, blacklist: &[String]) -> bool {
    let Some(name) = file.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    blacklist.iter().any(|b| b.eq_ignore_ascii_case(&name))
}
