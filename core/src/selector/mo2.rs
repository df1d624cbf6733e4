use std::path::{Path, PathBuf};
use std::sync::Arc;

use modkit_shared::{GameSpec, MO2_PORTABLE_LABEL};

use super::{InstanceSource, SelectorError};
use crate::manager::Mo2InstanceInfo;

/// Selection of an existing MO2 instance and profile.
///
/// Global instances live in `<appdata>/<name>`; a portable instance is
/// picked by its folder.
#[derive(Debug, Clone)]
pub struct Mo2SelectorForm {
    appdata: PathBuf,
    instances: Vec<String>,
    instance: Option<String>,
    portable_path: Option<PathBuf>,
    profiles: Vec<String>,
    profile: Option<String>,
}

impl Mo2SelectorForm {
    pub fn new(appdata: impl Into<PathBuf>) -> Self {
        Self {
            appdata: appdata.into(),
            instances: Vec::new(),
            instance: None,
            portable_path: None,
            profiles: Vec::new(),
            profile: None,
        }
    }

    /// Replace the list of global instances and clear the selection.
    pub fn set_instances(&mut self, names: Vec<String>) {
        self.instances = names;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.instance = None;
        self.portable_path = None;
        self.profiles.clear();
        self.profile = None;
    }

    /// Global instance names followed by the portable choice.
    pub fn choices(&self) -> Vec<String> {
        let mut choices = self.instances.clone();
        choices.push(MO2_PORTABLE_LABEL.to_string());
        choices
    }

    pub fn selected_instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn is_portable(&self) -> bool {
        self.instance.as_deref() == Some(MO2_PORTABLE_LABEL)
    }

    pub fn portable_path(&self) -> Option<&Path> {
        self.portable_path.as_deref()
    }

    pub fn base_folder(&self) -> Option<PathBuf> {
        match self.instance.as_deref()? {
            MO2_PORTABLE_LABEL => self.portable_path.clone(),
            name => Some(self.appdata.join(name)),
        }
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn selected_profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Select one of [`choices`](Self::choices), or nothing.
    ///
    /// Choosing a global instance loads its profiles; choosing the portable
    /// entry waits for [`set_portable_path`](Self::set_portable_path).
    pub fn select_instance(
        &mut self,
        choice: Option<&str>,
        source: &dyn InstanceSource,
    ) -> Result<(), SelectorError> {
        let Some(choice) = choice else {
            self.reset();
            return Ok(());
        };

        if choice == MO2_PORTABLE_LABEL {
            self.reset();
            self.instance = Some(choice.to_string());
            return Ok(());
        }

        if !self.instances.iter().any(|name| name == choice) {
            return Err(SelectorError::UnknownChoice(choice.to_string()));
        }

        let profiles = source.profile_names(&self.appdata.join(choice))?;
        self.reset();
        self.instance = Some(choice.to_string());
        self.profiles = profiles;
        Ok(())
    }

    /// Select a portable instance by its folder and load its profiles.
    pub fn set_portable_path(
        &mut self,
        path: Option<PathBuf>,
        source: &dyn InstanceSource,
    ) -> Result<(), SelectorError> {
        let profiles = match &path {
            Some(path) => source.profile_names(path)?,
            None => Vec::new(),
        };

        self.instance = Some(MO2_PORTABLE_LABEL.to_string());
        self.portable_path = path;
        self.profiles = profiles;
        self.profile = None;
        Ok(())
    }

    pub fn select_profile(&mut self, profile: Option<&str>) -> Result<(), SelectorError> {
        match profile {
            Some(name) if !self.profiles.iter().any(|p| p == name) => {
                Err(SelectorError::UnknownChoice(name.to_string()))
            }
            _ => {
                self.profile = profile.map(str::to_string);
                Ok(())
            }
        }
    }

    pub fn validate(&self) -> bool {
        self.instance.is_some() && self.base_folder().is_some() && self.profile.is_some()
    }

    /// The selected instance, if the selection is complete.
    pub fn instance_info(&self, game: Arc<GameSpec>) -> Option<Mo2InstanceInfo> {
        let display_name = self.instance.clone()?;
        let profile = self.profile.clone()?;
        let base_folder = self.base_folder()?;

        Some(Mo2InstanceInfo {
            display_name,
            game,
            profile,
            is_global: !self.is_portable(),
            mods_folder: base_folder.join("mods"),
            profiles_folder: base_folder.join("profiles"),
            base_folder,
            install_mo2: true,
            use_root_builder: true,
        })
    }

    /// Restore the selection described by `info`.
    pub fn set_instance(
        &mut self,
        info: &Mo2InstanceInfo,
        source: &dyn InstanceSource,
    ) -> Result<(), SelectorError> {
        if info.is_global {
            self.select_instance(Some(&info.display_name), source)?;
        } else {
            self.set_portable_path(Some(info.base_folder.clone()), source)?;
        }
        self.select_profile(Some(&info.profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::StaticInstanceSource;

    const APPDATA: &str = "/appdata/ModOrganizer";

    fn source() -> StaticInstanceSource {
        StaticInstanceSource::new()
            .with_profiles(
                Path::new(APPDATA).join("Test Instance"),
                ["Default", "TestProfile"],
            )
            .with_profiles("/modding/Portable Instance", ["Default", "TestProfile"])
    }

    fn form() -> Mo2SelectorForm {
        let mut form = Mo2SelectorForm::new(APPDATA);
        form.set_instances(vec!["Test Instance".to_string()]);
        form
    }

    fn game() -> Arc<GameSpec> {
        Arc::new(GameSpec {
            id: "skyrimse".to_string(),
            display_name: "Skyrim Special Edition".to_string(),
            short_name: "SkyrimSE".to_string(),
            nexus_id: "skyrimspecialedition".to_string(),
            inidir: PathBuf::from("ini"),
            inifiles: Vec::new(),
            mods_folder: PathBuf::from("Data"),
            additional_files: Vec::new(),
        })
    }

    #[test]
    fn test_initial_state() {
        let form = form();
        assert_eq!(form.choices(), vec!["Test Instance", "Portable"]);
        assert_eq!(form.selected_instance(), None);
        assert!(form.profiles().is_empty());
        assert!(!form.validate());
    }

    #[test]
    fn test_select_global_instance() {
        let mut form = form();
        let source = source();

        form.select_instance(Some("Test Instance"), &source).unwrap();
        assert!(!form.is_portable());
        assert_eq!(form.profiles(), ["Default", "TestProfile"]);
        assert!(!form.validate());

        form.select_profile(Some("TestProfile")).unwrap();
        assert!(form.validate());

        let info = form.instance_info(game()).unwrap();
        assert_eq!(info.display_name, "Test Instance");
        assert_eq!(info.base_folder, Path::new(APPDATA).join("Test Instance"));
        assert_eq!(info.profile, "TestProfile");
        assert!(info.is_global);
    }

    #[test]
    fn test_select_portable_instance() {
        let mut form = form();
        let source = source();

        form.select_instance(Some("Portable"), &source).unwrap();
        assert!(form.is_portable());
        assert!(form.profiles().is_empty());
        assert!(!form.validate());

        form.set_portable_path(Some(PathBuf::from("/modding/Portable Instance")), &source)
            .unwrap();
        assert_eq!(form.profiles(), ["Default", "TestProfile"]);
        assert!(!form.validate());

        form.select_profile(Some("TestProfile")).unwrap();
        assert!(form.validate());

        let info = form.instance_info(game()).unwrap();
        assert_eq!(info.display_name, "Portable");
        assert_eq!(info.base_folder, PathBuf::from("/modding/Portable Instance"));
        assert_eq!(info.profiles_folder, PathBuf::from("/modding/Portable Instance/profiles"));
        assert!(!info.is_global);
    }

    #[test]
    fn test_unknown_choices() {
        let mut form = form();
        let source = source();

        assert_eq!(
            form.select_instance(Some("Other"), &source),
            Err(SelectorError::UnknownChoice("Other".to_string()))
        );
        form.select_instance(Some("Test Instance"), &source).unwrap();
        assert!(form.select_profile(Some("Missing")).is_err());
        assert_eq!(form.selected_profile(), None);
    }

    #[test]
    fn test_portable_path_without_instance() {
        let mut form = form();
        let err = form
            .set_portable_path(Some(PathBuf::from("/nowhere")), &source())
            .unwrap_err();
        assert!(matches!(err, SelectorError::Source(_)));
        assert_eq!(form.selected_instance(), None);
    }

    #[test]
    fn test_set_instance_roundtrip() {
        let source = source();
        let mut form = form();
        form.select_instance(Some("Test Instance"), &source).unwrap();
        form.select_profile(Some("Default")).unwrap();
        let info = form.instance_info(game()).unwrap();

        let mut restored = self::form();
        restored.set_instance(&info, &source).unwrap();
        assert_eq!(restored.instance_info(game()), Some(info));
    }
}
