//! Serde adapter storing a game as its id.
//!
//! Use with `#[serde(with = "game_ref")]` on `Arc<GameSpec>` fields.
//! Deserialization looks the id up in the process-wide [`GameService`], so
//! the registry must be initialized first.

use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use modkit_shared::is_safe_game_id;

use crate::games::{GameService, GameSpec};

pub fn serialize<S>(game: &Arc<GameSpec>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&game.id)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<GameSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = String::deserialize(deserializer)?;
    if !is_safe_game_id(&id) {
        return Err(D::Error::custom(format!("invalid game id {:?}", id)));
    }
    GameService::get()
        .and_then(|service| service.game_by_id(&id))
        .map_err(D::Error::custom)
}
