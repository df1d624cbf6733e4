//! Process-wide registry of supported games.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use modkit_shared::{
    GameSpec, MAX_GAMES_JSON_BYTES, PathVars, check_game_id, game_id_key,
    read_text_with_limit,
};

use super::GameServiceError;
use super::resolver::{ResolutionError, resolve_game};

static GAME_SERVICE: OnceLock<GameService> = OnceLock::new();

/// Where the game specification document comes from.
#[derive(Debug, Clone)]
pub enum GameSource {
    /// Raw JSON content.
    Json(String),
    /// Path to a JSON file (e.g. `games.json`).
    File(PathBuf),
}

impl GameSource {
    fn read(&self) -> Result<Cow<'_, str>, GameServiceError> {
        match self {
            GameSource::Json(json) => Ok(Cow::Borrowed(json)),
            GameSource::File(path) => read_text_with_limit(path, MAX_GAMES_JSON_BYTES)
                .map(Cow::Owned)
                .map_err(|e| GameServiceError::Configuration(format!("{:#}", e))),
        }
    }
}

/// Registry of game specifications, keyed by id.
///
/// Built once from a JSON array and immutable afterwards. The process-wide
/// instance is installed with [`GameService::init`] and read through
/// [`GameService::get`]; standalone registries can be built with
/// [`GameService::from_json`].
#[derive(Debug)]
pub struct GameService {
    games: Vec<Arc<GameSpec>>,
    /// Lower-cased id -> index into `games`.
    by_id: HashMap<String, usize>,
    /// Lower-cased short name -> index; the last declaration wins.
    by_short_name: HashMap<String, usize>,
    /// Nexus id -> index; the first declaration wins.
    by_nexus_id: HashMap<String, usize>,
}

impl GameService {
    /// Parse a JSON document into a standalone registry.
    ///
    /// `%VAR%` placeholders in game paths are resolved with `vars`.
    pub fn from_json(json: &str, vars: &PathVars) -> Result<Self, GameServiceError> {
        let specs: Vec<GameSpec> = serde_json::from_str(json)
            .map_err(|e| GameServiceError::Configuration(e.to_string()))?;

        let mut games = Vec::with_capacity(specs.len());
        let mut by_id = HashMap::with_capacity(specs.len());
        let mut by_short_name = HashMap::with_capacity(specs.len());
        let mut by_nexus_id = HashMap::with_capacity(specs.len());

        for (index, spec) in specs.into_iter().enumerate() {
            check_game_id(&spec.id).map_err(|reason| {
                GameServiceError::Configuration(format!("game #{} ({:?}): {}", index, spec.id, reason))
            })?;

            if by_id.insert(game_id_key(&spec.id), index).is_some() {
                return Err(GameServiceError::Configuration(format!(
                    "duplicate game id '{}'",
                    spec.id
                )));
            }
            by_short_name.insert(spec.short_name.to_lowercase(), index);
            by_nexus_id.entry(spec.nexus_id.clone()).or_insert(index);

            games.push(Arc::new(spec.resolved(vars)));
        }

        tracing::debug!("Parsed {} game specification(s)", games.len());

        Ok(Self {
            games,
            by_id,
            by_short_name,
            by_nexus_id,
        })
    }

    /// Build a standalone registry from a [`GameSource`].
    pub fn load(source: &GameSource, vars: &PathVars) -> Result<Self, GameServiceError> {
        let json = source.read()?;
        Self::from_json(&json, vars)
    }

    /// Initialize the process-wide registry, resolving paths against the
    /// current user's environment.
    ///
    /// Fails with [`GameServiceError::Configuration`] if the source is invalid
    /// (nothing is installed in that case) and with
    /// [`GameServiceError::AlreadyInitialized`] on every call after a
    /// successful one.
    pub fn init(source: GameSource) -> Result<&'static GameService, GameServiceError> {
        Self::init_with(source, &PathVars::from_env())
    }

    /// [`GameService::init`] with explicit path variables.
    pub fn init_with(
        source: GameSource,
        vars: &PathVars,
    ) -> Result<&'static GameService, GameServiceError> {
        if GAME_SERVICE.get().is_some() {
            return Err(GameServiceError::AlreadyInitialized);
        }
        Self::install(Self::load(&source, vars)?)
    }

    /// Install an already built registry as the process-wide one.
    pub fn install(service: GameService) -> Result<&'static GameService, GameServiceError> {
        let count = service.games.len();
        GAME_SERVICE
            .set(service)
            .map_err(|_| GameServiceError::AlreadyInitialized)?;
        tracing::info!("Game service initialized with {} game(s)", count);
        Self::get()
    }

    /// The process-wide registry.
    pub fn get() -> Result<&'static GameService, GameServiceError> {
        GAME_SERVICE.get().ok_or(GameServiceError::NotInitialized)
    }

    pub fn is_initialized() -> bool {
        GAME_SERVICE.get().is_some()
    }

    /// All supported games in declaration order.
    pub fn supported_games(&self) -> &[Arc<GameSpec>] {
        &self.games
    }

    /// Look up a game by id, ignoring case.
    pub fn game_by_id(&self, id: &str) -> Result<Arc<GameSpec>, GameServiceError> {
        let game = self.lookup(&self.by_id, &game_id_key(id), id);
        tracing::debug!("Lookup of game id '{}': {}", id, game.is_ok());
        game
    }

    /// Look up a game by short name (e.g. `"SkyrimSE"`), ignoring case.
    pub fn game_by_short_name(&self, short_name: &str) -> Result<Arc<GameSpec>, GameServiceError> {
        self.lookup(&self.by_short_name, &short_name.to_lowercase(), short_name)
    }

    /// Look up a game by its Nexus Mods id. Case-sensitive.
    pub fn game_by_nexus_id(&self, nexus_id: &str) -> Result<Arc<GameSpec>, GameServiceError> {
        self.lookup(&self.by_nexus_id, nexus_id, nexus_id)
    }

    /// Resolve a user query (exact id, case-insensitive id or short name,
    /// unique prefix), suggesting similar ids on failure.
    pub fn resolve(&self, query: &str) -> Result<Arc<GameSpec>, ResolutionError> {
        resolve_game(query, &self.games).map(Arc::clone)
    }

    fn lookup(
        &self,
        index: &HashMap<String, usize>,
        key: &str,
        query: &str,
    ) -> Result<Arc<GameSpec>, GameServiceError> {
        index
            .get(key)
            .map(|&i| Arc::clone(&self.games[i]))
            .ok_or_else(|| GameServiceError::NotFound(query.to_string()))
    }
}
