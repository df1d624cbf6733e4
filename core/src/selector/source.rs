use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use modkit_shared::GameSpec;

use super::SelectorError;

/// Lists what a mod manager has installed.
///
/// Reading a mod manager's own files is up to the host; the selector only
/// asks for names.
pub trait InstanceSource {
    /// Names of the instances (MO2) or profile labels (Vortex) for `game`.
    fn instance_names(&self, game: &GameSpec) -> Result<Vec<String>, SelectorError>;

    /// Profiles of the instance in `base_folder`.
    fn profile_names(&self, base_folder: &Path) -> Result<Vec<String>, SelectorError>;
}

/// An [`InstanceSource`] backed by fixed lists.
#[derive(Debug, Clone, Default)]
pub struct StaticInstanceSource {
    /// Game id -> instance names.
    pub instances: BTreeMap<String, Vec<String>>,
    /// Base folder -> profile names.
    pub profiles: BTreeMap<PathBuf, Vec<String>>,
}

impl StaticInstanceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instances<I, S>(mut self, game_id: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instances
            .insert(game_id.to_lowercase(), names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_profiles<I, S>(mut self, base_folder: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles
            .insert(base_folder.into(), names.into_iter().map(Into::into).collect());
        self
    }
}

impl InstanceSource for StaticInstanceSource {
    fn instance_names(&self, game: &GameSpec) -> Result<Vec<String>, SelectorError> {
        Ok(self
            .instances
            .get(&game.id.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    fn profile_names(&self, base_folder: &Path) -> Result<Vec<String>, SelectorError> {
        self.profiles
            .get(base_folder)
            .cloned()
            .ok_or_else(|| SelectorError::Source(format!("No instance at {}", base_folder.display())))
    }
}
