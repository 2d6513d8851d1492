//! Results of the most recent successful search.
//!
//! Following a game is only possible for a game returned by a search, so the
//! last result set is kept in storage between CLI invocations.

use serde::{Deserialize, Serialize};

use game_shelf_core::{Game, GameId};

use crate::storage::{KeyValueStore, LAST_SEARCH_KEY, load_json, persist_json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSearch {
    pub term: String,
    pub searched_at: String,
    pub games: Vec<Game>,
}

impl LastSearch {
    pub fn new(term: impl Into<String>, games: Vec<Game>) -> Self {
        Self {
            term: term.into(),
            searched_at: chrono::Utc::now().to_rfc3339(),
            games,
        }
    }

    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        load_json(store, LAST_SEARCH_KEY)
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        persist_json(store, LAST_SEARCH_KEY, self);
    }

    /// Forget the previous results, e.g. after a failed search.
    pub fn clear(store: &dyn KeyValueStore) {
        if let Err(e) = store.remove(LAST_SEARCH_KEY) {
            log::warn!("Failed to clear previous search results: {e}");
        }
    }

    pub fn find(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }
}
