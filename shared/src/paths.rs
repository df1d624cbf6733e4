//! `%VARIABLE%` placeholder resolution for paths in game specifications.
//!
//! Game specifications describe per-user locations such as
//! `%DOCUMENTS%/My Games/Skyrim Special Edition`. `PathVars` holds the
//! values substituted for those placeholders.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Variable names are stored upper-cased; lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVars {
    vars: BTreeMap<String, String>,
}

impl PathVars {
    /// Create an empty variable set. Every placeholder stays unresolved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables of the current user and process.
    ///
    /// Seeds `DOCUMENTS`, `LOCALAPPDATA`, `APPDATA` and `USERPROFILE` from the
    /// platform directories, then layers every process environment variable
    /// on top (so a real `%LOCALAPPDATA%` on Windows wins).
    pub fn from_env() -> Self {
        let mut vars = Self::new();

        if let Some(user_dirs) = directories::UserDirs::new() {
            if let Some(documents) = user_dirs.document_dir() {
                vars.set("DOCUMENTS", documents.to_string_lossy());
            }
            vars.set("USERPROFILE", user_dirs.home_dir().to_string_lossy());
        }
        if let Some(base_dirs) = directories::BaseDirs::new() {
            vars.set("LOCALAPPDATA", base_dirs.data_local_dir().to_string_lossy());
            vars.set("APPDATA", base_dirs.data_dir().to_string_lossy());
        }

        for (key, value) in std::env::vars() {
            vars.set(&key, value);
        }

        vars
    }

    /// Builder-style [`PathVars::set`].
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.vars.insert(name.to_uppercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(&name.to_uppercase()).map(String::as_str)
    }

    /// Replace every known `%NAME%` placeholder in `text`.
    ///
    /// Unknown placeholders and lone `%` characters are kept verbatim.
    pub fn resolve_str(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            match after.find('%') {
                Some(end) if end > 0 => match self.get(&after[..end]) {
                    Some(value) => {
                        out.push_str(value);
                        rest = &after[end + 1..];
                    }
                    None => {
                        // The closing '%' may open the next placeholder.
                        out.push('%');
                        rest = after;
                    }
                },
                _ => {
                    out.push('%');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// [`PathVars::resolve_str`] for paths.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        PathBuf::from(self.resolve_str(&path.to_string_lossy()))
    }
}
