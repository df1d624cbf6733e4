//! Centralized constants shared by the modkit crates.

/// Default file name of the game specification document.
pub const GAMES_FILE_NAME: &str = "games.json";

/// Maximum allowed size of a game specification document.
pub const MAX_GAMES_JSON_BYTES: u64 = 4 * 1024 * 1024; // 4 MiB

/// Maximum allowed size of an instance-info document.
pub const MAX_INSTANCE_JSON_BYTES: u64 = 1024 * 1024; // 1 MiB

/// Name of Mod Organizer 2's per-instance configuration file.
pub const MO2_INI_FILE_NAME: &str = "ModOrganizer.ini";

/// Choice label used for portable Mod Organizer 2 instances.
pub const MO2_PORTABLE_LABEL: &str = "Portable";

/// Profile created for new Mod Organizer 2 instances.
pub const MO2_DEFAULT_PROFILE: &str = "Default";

/// Suffix Mod Organizer 2 appends to separator folder names.
pub const MO2_SEPARATOR_SUFFIX: &str = "_separator";
