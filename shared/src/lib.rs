//! Shared types for modkit.
//!
//! Plain data and helpers used by both the core library and the CLI:
//! game specification records, identifier validation, `%VAR%` path
//! resolution and small filesystem utilities.

pub mod constants;
pub mod fs;
pub mod game;
pub mod ids;
pub mod paths;

pub use constants::*;
pub use fs::{clean_fs_string, is_relative_to, read_text_with_limit};
pub use game::GameSpec;
pub use ids::{UnsafeId, check_game_id, game_id_key, is_safe_game_id};
pub use paths::PathVars;
