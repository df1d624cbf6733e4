//! Configuration management (config.toml)
//!
//! Settings are stored in TOML format in the platform-specific config
//! directory. Every section is optional; missing values take defaults.

use std::io;
use std::path::{Path, PathBuf};

use modkit_shared::{GAMES_FILE_NAME, PathVars};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub games: GamesConfig,
    #[serde(default)]
    pub modorganizer: ModOrganizerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GamesConfig {
    /// Path to `games.json` (default: `games.json` in the data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl GamesConfig {
    /// The configured games file, falling back to the data directory.
    pub fn games_file(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join(GAMES_FILE_NAME)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModOrganizerConfig {
    /// Folder of MO2's global instances; `%VAR%` placeholders allowed
    /// (default: `%LOCALAPPDATA%/ModOrganizer`)
    #[serde(default = "default_mo2_appdata")]
    pub appdata: String,
}

impl ModOrganizerConfig {
    pub fn appdata_path(&self, vars: &PathVars) -> PathBuf {
        PathBuf::from(vars.resolve_str(&self.appdata))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_mo2_appdata() -> String {
    "%LOCALAPPDATA%/ModOrganizer".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ModOrganizerConfig {
    fn default() -> Self {
        Self {
            appdata: default_mo2_appdata(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.modkit", "", "modkit")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the platform-specific data directory, where `games.json` lives
/// by default.
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.modkit", "", "modkit")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    match load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Config::default()
        }
        Err(err) => {
            tracing::warn!("{}; using defaults", err);
            Config::default()
        }
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves the configuration to the platform's configuration directory and
/// returns the written path. Nothing is written if there is no home
/// directory.
pub fn save(config: &Config) -> Result<Option<PathBuf>, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    save_to(config, &path)?;
    Ok(Some(path))
}

/// Saves the configuration to `path`, creating its directory.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(write_error)?;
    }
    let content = toml::to_string_pretty(config).map_err(|e| write_error(io::Error::other(e)))?;
    std::fs::write(path, content).map_err(write_error)?;

    tracing::debug!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.games.file, None);
        assert_eq!(config.modorganizer.appdata, "%LOCALAPPDATA%/ModOrganizer");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml_str = r#"
[games]
file = "/data/games.json"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.games.file, Some(PathBuf::from("/data/games.json")));
        assert_eq!(config.games.games_file(), Some(PathBuf::from("/data/games.json")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.modorganizer, ModOrganizerConfig::default());
    }

    #[test]
    fn test_appdata_path() {
        let vars = PathVars::new().with("LOCALAPPDATA", "C:/Users/me/AppData/Local");
        let config = ModOrganizerConfig::default();
        assert_eq!(
            config.appdata_path(&vars),
            PathBuf::from("C:/Users/me/AppData/Local/ModOrganizer")
        );
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.games.file = Some(PathBuf::from("/data/games.json"));
        config.logging.level = "trace".to_string();

        save_to(&config, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_from(&tmp.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[logging\nlevel = ").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse"));
    }
}
