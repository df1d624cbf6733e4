//! Shared setup for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use modkit_core::games::{GameService, GameServiceError, GameSource};
use modkit_shared::PathVars;

pub fn games_json() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/games.json")
}

pub fn test_vars() -> PathVars {
    PathVars::new()
        .with("DOCUMENTS", "/home/test/Documents")
        .with("LOCALAPPDATA", "/home/test/AppData/Local")
}

/// The process-wide registry, initialized from the fixture on first use.
///
/// Tests in one binary share a process, so whichever test comes first
/// installs it.
pub fn service() -> &'static GameService {
    match GameService::init_with(GameSource::File(games_json()), &test_vars()) {
        Ok(service) => service,
        Err(GameServiceError::AlreadyInitialized) => {
            GameService::get().expect("registry installed by another test")
        }
        Err(err) => panic!("failed to initialize game service: {}", err),
    }
}
