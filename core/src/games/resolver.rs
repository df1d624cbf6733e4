//! Game resolution from user queries
//!
//! Lookup by id through [`GameService::game_by_id`](super::GameService::game_by_id)
//! only accepts full ids. Command-line users type things like `skyrim` or `SkyrimSE`, so
//! this module resolves a query in stages:
//! 1. Exact case-sensitive id
//! 2. Case-insensitive id or short name (if unique)
//! 3. Case-insensitive prefix of id or short name (if unique)
//! 4. Error with suggestions for similar ids

use std::fmt;
use std::sync::Arc;

use modkit_shared::{GameSpec, game_id_key};

/// Maximum edit distance for a suggestion.
const SUGGESTION_DISTANCE: usize = 3;
/// Maximum number of suggestions returned.
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionError {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, " (did you mean: {}?)", self.suggestions.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolutionError {}

/// Resolve a query against a list of games. See the module docs for the
/// matching stages.
pub fn resolve_game<'a>(
    query: &str,
    games: &'a [Arc<GameSpec>],
) -> Result<&'a Arc<GameSpec>, ResolutionError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ResolutionError {
            message: "Empty game query".to_string(),
            suggestions: Vec::new(),
        });
    }

    if let Some(game) = games.iter().find(|g| g.id == query) {
        return Ok(game);
    }

    let lower = query.to_lowercase();

    let exact = unique_or_all(games, |g| {
        g.matches_id(query) || g.short_name.to_lowercase() == lower
    });
    if let Candidates::One(game) = exact {
        return Ok(game);
    }

    match unique_or_all(games, |g| {
        game_id_key(&g.id).starts_with(&lower) || g.short_name.to_lowercase().starts_with(&lower)
    }) {
        Candidates::One(game) => Ok(game),
        Candidates::Many(matches) => Err(ResolutionError {
            message: format!("Ambiguous game '{}' matches multiple games", query),
            suggestions: matches.iter().map(|g| g.id.clone()).collect(),
        }),
        Candidates::None => Err(ResolutionError {
            message: format!("Game '{}' not found", query),
            suggestions: similar_ids(query, games),
        }),
    }
}

enum Candidates<'a> {
    None,
    One(&'a Arc<GameSpec>),
    Many(Vec<&'a Arc<GameSpec>>),
}

fn unique_or_all<'a, F>(games: &'a [Arc<GameSpec>], pred: F) -> Candidates<'a>
where
    F: Fn(&GameSpec) -> bool,
{
    let mut matches: Vec<&Arc<GameSpec>> = games.iter().filter(|g| pred(g)).collect();
    match matches.len() {
        0 => Candidates::None,
        1 => Candidates::One(matches.remove(0)),
        _ => Candidates::Many(matches),
    }
}

/// Ids within [`SUGGESTION_DISTANCE`] edits of the query, closest first.
pub fn similar_ids(query: &str, games: &[Arc<GameSpec>]) -> Vec<String> {
    let lower = query.to_lowercase();
    let mut scored: Vec<(usize, &str)> = games
        .iter()
        .map(|g| (edit_distance(&lower, &g.id.to_lowercase()), g.id.as_str()))
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .collect();

    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, id)| id.to_string())
        .collect()
}

/// Levenshtein distance over chars, two rows at a time.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            cur[j + 1] = substitution.min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}
