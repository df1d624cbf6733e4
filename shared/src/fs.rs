//! Filesystem helpers shared across modkit crates.

use std::path::Path;

use anyhow::{Context, Result};

/// Characters that are not allowed in file or folder names on Windows.
const ILLEGAL_FS_CHARS: &[char] = &['<', '>', '\\', '/', '|', '*', '?', '"', ':'];

/// Read a UTF-8 text file with a size cap.
pub fn read_text_with_limit(path: &Path, max_bytes: u64) -> Result<String> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    let len = metadata.len();
    if len > max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            max_bytes
        );
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Strips characters that are illegal in path components, surrounding
/// whitespace and trailing dots.
///
/// `"Mod: The Sequel?. "` becomes `"Mod The Sequel"`.
pub fn clean_fs_string(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| !ILLEGAL_FS_CHARS.contains(c)).collect();
    cleaned.trim().trim_end_matches('.').to_string()
}

/// Whether `path` lies inside (or is) `base`, comparing path components.
pub fn is_relative_to(path: &Path, base: &Path) -> bool {
    path.strip_prefix(base).is_ok()
}
