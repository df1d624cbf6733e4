//! Game registry
//!
//! The [`GameService`] holds every supported [`GameSpec`] loaded from a
//! `games.json` document. It is initialized once per process and read-only
//! afterwards:
//!
//! ```ignore
//! use modkit_core::games::{GameService, GameSource};
//!
//! GameService::init(GameSource::File("games.json".into()))?;
//! let skyrim = GameService::get()?.game_by_id("skyrimse")?;
//! ```

mod error;
mod resolver;
mod service;

pub use error::GameServiceError;
pub use modkit_shared::GameSpec;
pub use resolver::{ResolutionError, edit_distance, resolve_game, similar_ids};
pub use service::{GameService, GameSource};
