use std::sync::Arc;

use modkit_shared::GameSpec;

use super::SelectorError;
use crate::manager::ProfileInfo;

/// Selection of a Vortex profile from its listed labels.
#[derive(Debug, Clone, Default)]
pub struct VortexSelectorForm {
    labels: Vec<String>,
    selected: Option<usize>,
}

impl VortexSelectorForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listed profile labels and clear the selection.
    pub fn set_instances(&mut self, labels: Vec<String>) {
        self.labels = labels;
        self.selected = None;
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected.map(|i| self.labels[i].as_str())
    }

    pub fn select_profile(&mut self, label: Option<&str>) -> Result<(), SelectorError> {
        self.selected = match label {
            Some(label) => Some(
                self.labels
                    .iter()
                    .position(|l| l == label)
                    .ok_or_else(|| SelectorError::UnknownChoice(label.to_string()))?,
            ),
            None => None,
        };
        Ok(())
    }

    pub fn validate(&self) -> bool {
        self.selected.is_some()
    }

    /// The selected profile, or `None` without a selection.
    pub fn instance_info(&self, game: Arc<GameSpec>) -> Result<Option<ProfileInfo>, SelectorError> {
        let Some(label) = self.selected_label() else {
            return Ok(None);
        };
        ProfileInfo::from_label(label, game)
            .map(Some)
            .ok_or_else(|| SelectorError::InvalidLabel(label.to_string()))
    }

    pub fn set_instance(&mut self, info: &ProfileInfo) -> Result<(), SelectorError> {
        self.select_profile(Some(&info.display_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

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

    fn form() -> VortexSelectorForm {
        let mut form = VortexSelectorForm::new();
        form.set_instances(vec![
            "Default (BkIX54nayg)".to_string(),
            "Test Instance (1a2b3c4d)".to_string(),
        ]);
        form
    }

    #[test]
    fn test_initial_state() {
        let form = form();
        assert_eq!(form.labels().len(), 2);
        assert_eq!(form.selected_label(), None);
        assert!(!form.validate());
        assert_eq!(form.instance_info(game()), Ok(None));
    }

    #[test]
    fn test_select_profile() {
        let mut form = form();

        form.select_profile(Some("Default (BkIX54nayg)")).unwrap();
        assert!(form.validate());

        form.select_profile(None).unwrap();
        assert!(!form.validate());

        form.select_profile(Some("Test Instance (1a2b3c4d)")).unwrap();
        assert!(form.validate());

        let info = form.instance_info(game()).unwrap().unwrap();
        assert_eq!(info.id, "1a2b3c4d");
        assert_eq!(info.display_name, "Test Instance (1a2b3c4d)");
    }

    #[test]
    fn test_unknown_profile() {
        let mut form = form();
        assert!(form.select_profile(Some("Other (x)")).is_err());
        assert!(!form.validate());
    }

    #[test]
    fn test_invalid_label() {
        let mut form = VortexSelectorForm::new();
        form.set_instances(vec!["Broken".to_string()]);
        form.select_profile(Some("Broken")).unwrap();
        assert_eq!(
            form.instance_info(game()),
            Err(SelectorError::InvalidLabel("Broken".to_string()))
        );
    }
}
