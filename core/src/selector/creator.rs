//! Creation of new MO2 instances

use std::path::{Path, PathBuf};
use std::sync::Arc;

use modkit_shared::{GameSpec, MO2_DEFAULT_PROFILE, clean_fs_string, is_relative_to};

use super::Observers;
use crate::manager::Mo2InstanceInfo;

/// Settings for a new MO2 instance.
///
/// Paths follow each other the way MO2's own instance wizard does: a
/// global instance always lives in `<appdata>/<name>`, renaming a portable
/// instance renames its folder, and the mods folder moves along with the
/// base folder while it is nested in it. Every change notifies `valid`.
pub struct Mo2CreatorForm {
    appdata: PathBuf,
    name: String,
    is_global: bool,
    base_folder: Option<PathBuf>,
    mods_folder: Option<PathBuf>,
    install_mo2: bool,
    use_root_builder: bool,
    pub valid: Observers<bool>,
}

impl Mo2CreatorForm {
    /// A blank form for a global instance.
    pub fn new(appdata: impl Into<PathBuf>) -> Self {
        let mut form = Self {
            appdata: appdata.into(),
            name: String::new(),
            is_global: false,
            base_folder: None,
            mods_folder: None,
            install_mo2: false,
            use_root_builder: false,
            valid: Observers::new(),
        };
        form.set_global(true);
        form
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_global(&self) -> bool {
        self.is_global
    }

    pub fn base_folder(&self) -> Option<&Path> {
        self.base_folder.as_deref()
    }

    pub fn mods_folder(&self) -> Option<&Path> {
        self.mods_folder.as_deref()
    }

    pub fn install_mo2(&self) -> bool {
        self.install_mo2
    }

    pub fn use_root_builder(&self) -> bool {
        self.use_root_builder
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();

        if self.is_global {
            self.move_base_folder(Some(self.global_folder(name)));
        } else if let Some(parent) = self
            .base_folder
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
        {
            self.move_base_folder(Some(parent.join(name)));
        }

        self.notify();
    }

    /// Switch between a global and a portable instance.
    ///
    /// Global instances get their folders derived from the name and cannot
    /// install MO2; switching to portable clears both folders.
    pub fn set_global(&mut self, global: bool) {
        self.is_global = global;

        if global {
            let base = self.global_folder(&self.name);
            self.move_base_folder(Some(base.clone()));
            self.mods_folder = Some(base.join("mods"));
            self.install_mo2 = false;
        } else {
            self.base_folder = None;
            self.mods_folder = None;
        }

        self.notify();
    }

    pub fn set_base_folder(&mut self, folder: Option<PathBuf>) {
        if self.is_global {
            tracing::debug!("Ignoring base folder change of a global instance");
        } else {
            self.move_base_folder(folder);
        }
        self.notify();
    }

    pub fn set_mods_folder(&mut self, folder: Option<PathBuf>) {
        self.mods_folder = folder;
        self.notify();
    }

    pub fn set_install_mo2(&mut self, install: bool) {
        self.install_mo2 = install;
        self.notify();
    }

    pub fn set_use_root_builder(&mut self, use_root_builder: bool) {
        self.use_root_builder = use_root_builder;
        self.notify();
    }

    pub fn validate(&self) -> bool {
        if self.name.trim().is_empty() {
            return false;
        }

        let Some(base) = self.base_folder.as_deref() else {
            return false;
        };
        if !self.is_global && !parent_exists(base) {
            return false;
        }

        let Some(mods) = self.mods_folder.as_deref() else {
            return false;
        };
        if !self.is_global && !parent_exists(mods) && !is_relative_to(mods, base) {
            return false;
        }

        !(self.is_global && self.install_mo2)
    }

    /// The new instance with its `Default` profile, if the form is valid.
    pub fn instance_info(&self, game: Arc<GameSpec>) -> Option<Mo2InstanceInfo> {
        if !self.validate() {
            return None;
        }
        let base_folder = self.base_folder.clone()?;
        let mods_folder = self.mods_folder.clone()?;

        Some(Mo2InstanceInfo {
            display_name: self.name.clone(),
            game,
            profile: MO2_DEFAULT_PROFILE.to_string(),
            is_global: self.is_global,
            profiles_folder: base_folder.join("profiles"),
            base_folder,
            mods_folder,
            install_mo2: self.install_mo2,
            use_root_builder: self.use_root_builder,
        })
    }

    fn global_folder(&self, name: &str) -> PathBuf {
        let folder = clean_fs_string(name);
        if folder.is_empty() {
            self.appdata.clone()
        } else {
            self.appdata.join(folder)
        }
    }

    fn move_base_folder(&mut self, folder: Option<PathBuf>) {
        let old = std::mem::replace(&mut self.base_folder, folder.clone());
        let Some(new) = folder else {
            return;
        };

        if !self.is_global {
            if let Some(name) = new.file_name() {
                self.name = name.to_string_lossy().into_owned();
            }
        }

        match (old, self.mods_folder.as_deref()) {
            (Some(old), Some(mods)) => {
                if let Ok(nested) = mods.strip_prefix(&old) {
                    self.mods_folder = Some(new.join(nested));
                }
            }
            (_, None) => self.mods_folder = Some(new.join("mods")),
            (None, Some(_)) => {}
        }
    }

    fn notify(&mut self) {
        let valid = self.validate();
        self.valid.notify(&valid);
    }
}

fn parent_exists(path: &Path) -> bool {
    path.parent().is_some_and(Path::is_dir)
}
