//! Vortex profile identification

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::game_ref;
use crate::games::GameSpec;

/// Identifies a Vortex profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub display_name: String,
    #[serde(with = "game_ref")]
    pub game: Arc<GameSpec>,
    /// Vortex' internal profile id (e.g. `"BkIX54nayg"`).
    pub id: String,
}

impl ProfileInfo {
    /// The label a profile is listed with: `"<name> (<id>)"`.
    pub fn label(name: &str, id: &str) -> String {
        format!("{} ({})", name, id)
    }

    /// Split a profile label into its name and id.
    ///
    /// The id is taken from the last parenthesised group, so names may
    /// contain parentheses themselves.
    pub fn split_label(label: &str) -> Option<(&str, &str)> {
        let inner = label.strip_suffix(')')?;
        inner.rsplit_once(" (")
    }

    /// Build profile info from a listed label. The label becomes the display
    /// name.
    pub fn from_label(label: &str, game: Arc<GameSpec>) -> Option<Self> {
        let (_, id) = Self::split_label(label)?;
        Some(Self {
            display_name: label.to_string(),
            game,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_label() {
        assert_eq!(
            ProfileInfo::split_label("Default (BkIX54nayg)"),
            Some(("Default", "BkIX54nayg"))
        );
        assert_eq!(
            ProfileInfo::split_label("Survival (Hardcore) (1a2b3c4d)"),
            Some(("Survival (Hardcore)", "1a2b3c4d"))
        );
        assert_eq!(ProfileInfo::split_label("Default"), None);
        assert_eq!(ProfileInfo::split_label("Default(abc)"), None);
    }

    #[test]
    fn test_label() {
        assert_eq!(ProfileInfo::label("Test Instance", "1a2b3c4d"), "Test Instance (1a2b3c4d)");
    }
}
