//! Validation for identifiers that end up as lookup keys or path components.

use std::fmt;

/// Reason an identifier was rejected by [`check_game_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsafeId {
    Empty,
    DotSegment,
    LeadingWhitespace,
    TrailingDotOrSpace,
    Separator,
    ControlCharacter,
    ReservedCharacter(char),
}

impl fmt::Display for UnsafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsafeId::Empty => write!(f, "identifier is empty"),
            UnsafeId::DotSegment => write!(f, "identifier is a '.' or '..' segment"),
            UnsafeId::LeadingWhitespace => write!(f, "identifier starts with whitespace"),
            UnsafeId::TrailingDotOrSpace => write!(f, "identifier ends with '.' or whitespace"),
            UnsafeId::Separator => write!(f, "identifier contains a path separator"),
            UnsafeId::ControlCharacter => write!(f, "identifier contains a control character"),
            UnsafeId::ReservedCharacter(c) => {
                write!(f, "identifier contains reserved character '{}'", c)
            }
        }
    }
}

/// Checks that a game id can serve as a registry key and as a single path
/// component on every platform mod managers run on.
///
/// Leading/trailing whitespace is rejected along with the Windows-reserved
/// filename characters, since Vortex stores per-game state under the id.
pub fn check_game_id(id: &str) -> Result<(), UnsafeId> {
    if id.trim().is_empty() {
        return Err(UnsafeId::Empty);
    }
    if id == "." || id == ".." {
        return Err(UnsafeId::DotSegment);
    }
    if id.starts_with(char::is_whitespace) {
        return Err(UnsafeId::LeadingWhitespace);
    }
    if id.ends_with('.') || id.ends_with(char::is_whitespace) {
        return Err(UnsafeId::TrailingDotOrSpace);
    }

    for c in id.chars() {
        match c {
            '/' | '\\' => return Err(UnsafeId::Separator),
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => return Err(UnsafeId::ReservedCharacter(c)),
            c if c.is_control() => return Err(UnsafeId::ControlCharacter),
            _ => {}
        }
    }

    Ok(())
}

/// Key under which game ids are compared. Ids are case-insensitive under
/// full Unicode lower-casing.
pub fn game_id_key(id: &str) -> String {
    id.to_lowercase()
}

/// Returns true if [`check_game_id`] accepts the id.
pub fn is_safe_game_id(id: &str) -> bool {
    check_game_id(id).is_ok()
}
