//! Headless instance selection
//!
//! These models hold the state a GUI needs to let a user pick (or create) a
//! mod instance. Hosts render them however they like and subscribe to the
//! [`Observers`] to follow changes. What instances and profiles exist is
//! supplied through an [`InstanceSource`] per mod manager.

mod creator;
mod error;
mod mo2;
mod observers;
mod source;
mod vortex;

use std::path::PathBuf;
use std::sync::Arc;

use hashbrown::HashMap;
use modkit_shared::GameSpec;

use crate::manager::{InstanceInfo, ModManager};

pub use creator::Mo2CreatorForm;
pub use error::SelectorError;
pub use mo2::Mo2SelectorForm;
pub use observers::{Observers, SubscriptionId};
pub use source::{InstanceSource, StaticInstanceSource};
pub use vortex::VortexSelectorForm;

/// Selects a mod manager and an instance within it for the current game.
///
/// `changed` fires after every change of the selection; `instance_valid`
/// fires after every re-validation with whether instance data is available.
pub struct InstanceSelector {
    game: Option<Arc<GameSpec>>,
    mod_manager: Option<ModManager>,
    instance_data: Option<InstanceInfo>,
    sources: HashMap<ModManager, Box<dyn InstanceSource>>,
    mo2: Mo2SelectorForm,
    vortex: VortexSelectorForm,
    pub changed: Observers<()>,
    pub instance_valid: Observers<bool>,
}

impl InstanceSelector {
    /// `mo2_appdata` is the folder containing MO2's global instances.
    pub fn new(mo2_appdata: impl Into<PathBuf>) -> Self {
        Self {
            game: None,
            mod_manager: None,
            instance_data: None,
            sources: HashMap::new(),
            mo2: Mo2SelectorForm::new(mo2_appdata),
            vortex: VortexSelectorForm::new(),
            changed: Observers::new(),
            instance_valid: Observers::new(),
        }
    }

    pub fn with_source(mut self, mod_manager: ModManager, source: impl InstanceSource + 'static) -> Self {
        self.set_source(mod_manager, Box::new(source));
        self
    }

    pub fn set_source(&mut self, mod_manager: ModManager, source: Box<dyn InstanceSource>) {
        self.sources.insert(mod_manager, source);
    }

    pub fn game(&self) -> Option<&Arc<GameSpec>> {
        self.game.as_ref()
    }

    pub fn mod_manager(&self) -> Option<ModManager> {
        self.mod_manager
    }

    pub fn mo2_form(&self) -> &Mo2SelectorForm {
        &self.mo2
    }

    pub fn vortex_form(&self) -> &VortexSelectorForm {
        &self.vortex
    }

    /// Change the game. Any mod manager and instance selection is reset.
    pub fn set_game(&mut self, game: Option<Arc<GameSpec>>) {
        tracing::debug!(
            "Instance selector game: {}",
            game.as_ref().map_or("<none>", |g| g.id.as_str())
        );

        self.game = game;
        self.mod_manager = None;
        self.mo2.reset();
        self.vortex.reset();
        self.revalidate();
        self.changed.notify(&());
    }

    /// Change the mod manager and load its instances for the current game.
    pub fn set_mod_manager(&mut self, mod_manager: Option<ModManager>) -> Result<(), SelectorError> {
        match mod_manager {
            Some(manager) => {
                let game = self.game.clone().ok_or(SelectorError::NoGameSelected)?;
                let names = source_for(&self.sources, manager)?.instance_names(&game)?;
                tracing::debug!("Loaded {} {} instance(s) for {}", names.len(), manager, game.id);

                match manager {
                    ModManager::ModOrganizer => self.mo2.set_instances(names),
                    ModManager::Vortex => self.vortex.set_instances(names),
                }
                self.mod_manager = Some(manager);
            }
            None => self.mod_manager = None,
        }

        self.revalidate();
        self.changed.notify(&());
        Ok(())
    }

    pub fn select_mo2_instance(&mut self, choice: Option<&str>) -> Result<(), SelectorError> {
        let source = source_for(&self.sources, ModManager::ModOrganizer)?;
        self.mo2.select_instance(choice, source)?;
        self.form_changed();
        Ok(())
    }

    pub fn set_mo2_portable_path(&mut self, path: Option<PathBuf>) -> Result<(), SelectorError> {
        let source = source_for(&self.sources, ModManager::ModOrganizer)?;
        self.mo2.set_portable_path(path, source)?;
        self.form_changed();
        Ok(())
    }

    pub fn select_mo2_profile(&mut self, profile: Option<&str>) -> Result<(), SelectorError> {
        self.mo2.select_profile(profile)?;
        self.form_changed();
        Ok(())
    }

    pub fn select_vortex_profile(&mut self, label: Option<&str>) -> Result<(), SelectorError> {
        self.vortex.select_profile(label)?;
        self.form_changed();
        Ok(())
    }

    /// Whether the form of the current mod manager is complete.
    pub fn validate(&self) -> bool {
        match self.mod_manager {
            Some(ModManager::ModOrganizer) => self.mo2.validate(),
            Some(ModManager::Vortex) => self.vortex.validate(),
            None => false,
        }
    }

    pub fn current_instance_data(&self) -> Option<&InstanceInfo> {
        self.instance_data.as_ref()
    }

    /// Select the instance described by `data`, or reset the selection.
    ///
    /// The game and mod manager are taken from `data`. If `data` cannot be
    /// restored the selector is left as it was and nothing is notified.
    pub fn set_current_instance_data(&mut self, data: Option<InstanceInfo>) -> Result<(), SelectorError> {
        let Some(data) = data else {
            self.mod_manager = None;
            self.instance_data = None;
            self.mo2.reset();
            self.vortex.reset();
            self.instance_valid.notify(&false);
            self.changed.notify(&());
            return Ok(());
        };

        let game = Arc::clone(data.game());
        let manager = data.mod_manager();
        let source = source_for(&self.sources, manager)?;
        let names = source.instance_names(&game)?;

        // Restore into copies so a failed selection leaves the forms intact.
        match &data {
            InstanceInfo::ModOrganizer(info) => {
                let mut form = self.mo2.clone();
                form.set_instances(names);
                form.set_instance(info, source)?;
                self.mo2 = form;
            }
            InstanceInfo::Vortex(info) => {
                let mut form = self.vortex.clone();
                form.set_instances(names);
                form.set_instance(info)?;
                self.vortex = form;
            }
        }

        self.game = Some(game);
        self.mod_manager = Some(manager);
        self.instance_data = Some(data);
        self.instance_valid.notify(&true);
        self.changed.notify(&());
        Ok(())
    }

    fn form_changed(&mut self) {
        self.revalidate();
        self.changed.notify(&());
    }

    fn revalidate(&mut self) {
        self.instance_data = match (self.mod_manager, self.game.clone()) {
            (Some(ModManager::ModOrganizer), Some(game)) => {
                self.mo2.instance_info(game).map(InstanceInfo::from)
            }
            (Some(ModManager::Vortex), Some(game)) => match self.vortex.instance_info(game) {
                Ok(info) => info.map(InstanceInfo::from),
                Err(err) => {
                    tracing::warn!("{}", err);
                    None
                }
            },
            _ => None,
        };

        let valid = self.instance_data.is_some();
        self.instance_valid.notify(&valid);
    }
}

fn source_for(
    sources: &HashMap<ModManager, Box<dyn InstanceSource>>,
    mod_manager: ModManager,
) -> Result<&dyn InstanceSource, SelectorError> {
    sources
        .get(&mod_manager)
        .map(|source| source.as_ref())
        .ok_or_else(|| SelectorError::Source(format!("No instance source for {}", mod_manager)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    const APPDATA: &str = "/appdata/ModOrganizer";

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

    fn fallout4() -> Arc<GameSpec> {
        Arc::new(GameSpec {
            id: "fallout4".to_string(),
            display_name: "Fallout 4".to_string(),
            short_name: "Fallout4".to_string(),
            nexus_id: "fallout4".to_string(),
            inidir: PathBuf::from("ini"),
            inifiles: Vec::new(),
            mods_folder: PathBuf::from("Data"),
            additional_files: Vec::new(),
        })
    }

    fn selector() -> InstanceSelector {
        InstanceSelector::new(APPDATA)
            .with_source(
                ModManager::ModOrganizer,
                StaticInstanceSource::new()
                    .with_instances("skyrimse", ["Test Instance"])
                    .with_instances("fallout4", ["Fo4"])
                    .with_profiles(Path::new(APPDATA).join("Test Instance"), ["Default", "TestProfile"])
                    .with_profiles(Path::new(APPDATA).join("Fo4"), ["Default"]),
            )
            .with_source(
                ModManager::Vortex,
                StaticInstanceSource::new()
                    .with_instances("skyrimse", ["Default (BkIX54nayg)", "Test Instance (1a2b3c4d)"]),
            )
    }

    /// Records every `instance_valid` value and counts `changed`.
    fn record(selector: &mut InstanceSelector) -> (Rc<RefCell<Vec<bool>>>, Rc<RefCell<usize>>) {
        let valid = Rc::new(RefCell::new(Vec::new()));
        let changed = Rc::new(RefCell::new(0));

        let log = Rc::clone(&valid);
        selector.instance_valid.subscribe(move |v| log.borrow_mut().push(*v));
        let count = Rc::clone(&changed);
        selector.changed.subscribe(move |_| *count.borrow_mut() += 1);

        (valid, changed)
    }

    #[test]
    fn test_mod_manager_requires_game() {
        let mut selector = selector();
        assert_eq!(
            selector.set_mod_manager(Some(ModManager::Vortex)),
            Err(SelectorError::NoGameSelected)
        );
        assert_eq!(selector.mod_manager(), None);
    }

    #[test]
    fn test_missing_source() {
        let mut selector = InstanceSelector::new(APPDATA);
        selector.set_game(Some(game()));
        assert!(matches!(
            selector.set_mod_manager(Some(ModManager::ModOrganizer)),
            Err(SelectorError::Source(_))
        ));
    }

    #[test]
    fn test_select_vortex_profile() {
        let mut selector = selector();
        selector.set_game(Some(game()));
        let (valid, changed) = record(&mut selector);

        selector.set_mod_manager(Some(ModManager::Vortex)).unwrap();
        assert_eq!(selector.vortex_form().labels().len(), 2);
        assert!(!selector.validate());

        selector.select_vortex_profile(Some("Default (BkIX54nayg)")).unwrap();
        assert!(selector.validate());
        match selector.current_instance_data() {
            Some(InstanceInfo::Vortex(info)) => assert_eq!(info.id, "BkIX54nayg"),
            other => panic!("unexpected instance data: {:?}", other),
        }

        selector.select_vortex_profile(None).unwrap();
        assert!(selector.current_instance_data().is_none());

        assert_eq!(*valid.borrow(), vec![false, true, false]);
        assert_eq!(*changed.borrow(), 3);
    }

    #[test]
    fn test_select_mo2_instance() {
        let mut selector = selector();
        selector.set_game(Some(game()));
        let (valid, _) = record(&mut selector);

        selector.set_mod_manager(Some(ModManager::ModOrganizer)).unwrap();
        assert_eq!(selector.mo2_form().choices(), vec!["Test Instance", "Portable"]);

        selector.select_mo2_instance(Some("Test Instance")).unwrap();
        selector.select_mo2_profile(Some("TestProfile")).unwrap();

        let Some(InstanceInfo::ModOrganizer(info)) = selector.current_instance_data() else {
            panic!("expected MO2 instance data");
        };
        assert_eq!(info.label(), "Test Instance > TestProfile");
        assert_eq!(*valid.borrow(), vec![false, false, true]);
    }

    #[test]
    fn test_set_game_resets_selection() {
        let mut selector = selector();
        selector.set_game(Some(game()));
        selector.set_mod_manager(Some(ModManager::Vortex)).unwrap();
        selector.select_vortex_profile(Some("Default (BkIX54nayg)")).unwrap();
        assert!(selector.current_instance_data().is_some());

        let (valid, changed) = record(&mut selector);
        selector.set_game(Some(game()));

        assert_eq!(selector.mod_manager(), None);
        assert!(selector.current_instance_data().is_none());
        assert!(!selector.validate());
        assert_eq!(*valid.borrow(), vec![false]);
        assert_eq!(*changed.borrow(), 1);
    }

    #[test]
    fn test_clear_mod_manager() {
        let mut selector = selector();
        selector.set_game(Some(game()));
        selector.set_mod_manager(Some(ModManager::Vortex)).unwrap();
        selector.select_vortex_profile(Some("Default (BkIX54nayg)")).unwrap();
        let (valid, changed) = record(&mut selector);

        selector.set_mod_manager(None).unwrap();
        assert!(selector.current_instance_data().is_none());
        assert!(!selector.validate());
        assert_eq!(*valid.borrow(), vec![false]);
        assert_eq!(*changed.borrow(), 1);
    }

    #[test]
    fn test_set_current_instance_data() {
        let mut selector = selector();
        let info = crate::manager::ProfileInfo::from_label("Test Instance (1a2b3c4d)", game()).unwrap();
        let (valid, changed) = record(&mut selector);

        selector.set_current_instance_data(Some(info.clone().into())).unwrap();
        assert_eq!(selector.mod_manager(), Some(ModManager::Vortex));
        assert_eq!(selector.vortex_form().selected_label(), Some("Test Instance (1a2b3c4d)"));
        assert_eq!(selector.current_instance_data(), Some(&InstanceInfo::Vortex(info)));
        assert!(selector.validate());

        assert_eq!(*valid.borrow(), vec![true]);
        assert_eq!(*changed.borrow(), 1);

        selector.set_current_instance_data(None).unwrap();
        assert_eq!(selector.mod_manager(), None);
        assert!(selector.current_instance_data().is_none());
        assert_eq!(*valid.borrow(), vec![true, false]);
        assert_eq!(*changed.borrow(), 2);
    }

    #[test]
    fn test_failed_restore_keeps_selection() {
        let mut selector = selector();
        selector.set_game(Some(game()));
        selector.set_mod_manager(Some(ModManager::ModOrganizer)).unwrap();
        selector.select_mo2_instance(Some("Test Instance")).unwrap();
        selector.select_mo2_profile(Some("Default")).unwrap();
        let before = selector.current_instance_data().cloned();
        let (valid, changed) = record(&mut selector);

        let base_folder = Path::new(APPDATA).join("Fo4");
        let info = crate::manager::Mo2InstanceInfo {
            display_name: "Fo4".to_string(),
            game: fallout4(),
            profile: "Missing".to_string(),
            is_global: true,
            mods_folder: base_folder.join("mods"),
            profiles_folder: base_folder.join("profiles"),
            base_folder,
            install_mo2: false,
            use_root_builder: false,
        };

        assert_eq!(
            selector.set_current_instance_data(Some(info.into())),
            Err(SelectorError::UnknownChoice("Missing".to_string()))
        );
        assert_eq!(selector.game().map(|g| g.id.as_str()), Some("skyrimse"));
        assert_eq!(selector.mod_manager(), Some(ModManager::ModOrganizer));
        assert_eq!(selector.mo2_form().choices(), vec!["Test Instance", "Portable"]);
        assert_eq!(selector.mo2_form().selected_instance(), Some("Test Instance"));
        assert_eq!(selector.mo2_form().selected_profile(), Some("Default"));
        assert!(selector.validate());
        assert_eq!(selector.current_instance_data().cloned(), before);
        assert!(valid.borrow().is_empty());
        assert_eq!(*changed.borrow(), 0);

        selector.select_mo2_profile(Some("TestProfile")).unwrap();
        let Some(InstanceInfo::ModOrganizer(info)) = selector.current_instance_data() else {
            panic!("expected MO2 instance data");
        };
        assert_eq!(info.display_name, "Test Instance");
        assert_eq!(info.game.id, "skyrimse");
    }
}
