//! modkit Core - Game registry and mod instance models
//!
//! This crate holds the data every modkit tool works with: the supported
//! games, the mod managers and their instances, and the headless models a
//! GUI uses to select or create an instance.
//!
//! # Architecture
//!
//! - [`GameService`] - Process-wide registry of supported games
//! - [`InstanceInfo`] - Identifies an instance within a mod manager
//! - [`Instance`] - Mods, tools and the conflicts between them
//! - [`InstanceSelector`] - Selection state for picking an instance

pub mod config;
pub mod games;
pub mod instance;
pub mod manager;
pub mod selector;

pub use games::{GameService, GameServiceError, GameSource, GameSpec};
pub use instance::{Instance, Mod, ModType, Tool};
pub use manager::{InstanceInfo, ModManager, Mo2InstanceInfo, ProfileInfo};
pub use selector::{InstanceSelector, InstanceSource, Mo2CreatorForm, SelectorError};
