//! Tier list assignment.
//!
//! The board partitions the eligible games of the collection into ranked
//! tiers and an unassigned pool. Only tier contents are stored; the pool is
//! always derived as "board games not in any tier", so the union of all
//! tiers and the pool is exactly the board's game set.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use game_shelf_core::{Game, GameId, Tier, TierId, default_tiers};

use crate::storage::{KeyValueStore, SCHEMA_VERSION, TIER_STATE_KEY, load_json, persist_json};

/// Saved tier state. `savedGames` is the unassigned pool at save time; it is
/// written for older readers but never trusted on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTierState {
    #[serde(default)]
    version: u32,
    saved_tiers: Vec<Tier>,
    #[serde(default)]
    saved_games: Vec<Game>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TierStateRecord<'a> {
    version: u32,
    saved_at: String,
    saved_tiers: &'a [Tier],
    saved_games: Vec<&'a Game>,
}

pub struct TierBoard {
    storage: Arc<dyn KeyValueStore>,
    tiers: Vec<Tier>,
    /// Eligible games of the collection, in collection order.
    games: Vec<Game>,
}

impl TierBoard {
    /// Load saved tiers and reconcile them against `collection`.
    pub fn load(storage: Arc<dyn KeyValueStore>, collection: &[Game]) -> Self {
        let games = eligible(collection);
        let tiers = match load_json::<StoredTierState>(storage.as_ref(), TIER_STATE_KEY) {
            Some(state) if state.version <= SCHEMA_VERSION => {
                log::debug!(
                    "Loaded {} tiers ({} cached unassigned games ignored)",
                    state.saved_tiers.len(),
                    state.saved_games.len()
                );
                state.saved_tiers
            }
            Some(state) => {
                log::warn!(
                    "Saved tier list has unsupported schema version {}, using defaults",
                    state.version
                );
                default_tiers()
            }
            None => default_tiers(),
        };
        let tiers = reconcile(tiers, &games);
        Self {
            storage,
            tiers,
            games,
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn tier(&self, id: &TierId) -> Option<&Tier> {
        self.tiers.iter().find(|t| &t.id == id)
    }

    /// Games eligible for the board, in collection order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// The tier currently holding `id`, if any.
    pub fn tier_of(&self, id: GameId) -> Option<&TierId> {
        self.tiers.iter().find(|t| t.contains(id)).map(|t| &t.id)
    }

    /// Board games not assigned to any tier, in collection order.
    pub fn unassigned(&self) -> Vec<&Game> {
        let placed: HashSet<GameId> = self.tiers.iter().flat_map(Tier::game_ids).collect();
        self.games
            .iter()
            .filter(|g| !placed.contains(&g.id))
            .collect()
    }

    /// Move a game between tiers or between a tier and the pool.
    ///
    /// `source == None` means the game comes from the pool; `target == None`
    /// (or an unknown tier) sends it to the pool once removed from `source`.
    /// A missing source entry is not an error. Games that are not on the
    /// board are never inserted. Returns the tier now holding the game.
    pub fn move_game(
        &mut self,
        id: GameId,
        source: Option<&TierId>,
        target: Option<&TierId>,
    ) -> Option<TierId> {
        let mut next = self.tiers.clone();

        if let Some(source) = source {
            match next.iter_mut().find(|t| &t.id == source) {
                Some(tier) => tier.games.retain(|g| g.id != id),
                None => log::debug!("Source tier {source} does not exist"),
            }
        }

        if let Some(target) = target {
            let slot = next.iter().position(|t| &t.id == target);
            let game = self.games.iter().find(|g| g.id == id);
            match (slot, game) {
                (Some(slot), Some(game)) => {
                    // A game sits in at most one tier
                    for tier in &mut next {
                        tier.games.retain(|g| g.id != id);
                    }
                    next[slot].games.push(game.clone());
                }
                (None, _) => log::debug!("Target tier {target} does not exist"),
                (_, None) => log::warn!("Game {id} is not on the tier board"),
            }
        }

        self.commit(next);
        self.tier_of(id).cloned()
    }

    /// Restore the stock tiers, all empty, with every game back in the pool.
    pub fn reset(&mut self) {
        self.commit(default_tiers());
    }

    /// Follow a collection change: refresh tier entries with the latest game
    /// data, drop unfollowed games and let new games appear in the pool.
    pub fn sync_collection(&mut self, collection: &[Game]) {
        self.games = eligible(collection);
        let next = reconcile(self.tiers.clone(), &self.games);
        self.commit(next);
    }

    fn commit(&mut self, tiers: Vec<Tier>) {
        self.tiers = tiers;
        let record = TierStateRecord {
            version: SCHEMA_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            saved_tiers: &self.tiers,
            saved_games: self.unassigned(),
        };
        persist_json(self.storage.as_ref(), TIER_STATE_KEY, &record);
    }
}

/// Games that may enter the board: a stable id and a cover image.
fn eligible(collection: &[Game]) -> Vec<Game> {
    collection
        .iter()
        .filter(|g| g.is_board_eligible())
        .cloned()
        .collect()
}

/// Bring saved tiers in line with the current board games: duplicate tier
/// ids and repeated games keep their first occurrence, unknown games are
/// dropped, and every entry is replaced by the current copy of the game.
fn reconcile(tiers: Vec<Tier>, games: &[Game]) -> Vec<Tier> {
    let by_id: HashMap<GameId, &Game> = games.iter().map(|g| (g.id, g)).collect();
    let mut seen_tiers = HashSet::new();
    let mut placed = HashSet::new();

    tiers
        .into_iter()
        .filter(|t| seen_tiers.insert(t.id.clone()))
        .map(|mut tier| {
            tier.games = std::mem::take(&mut tier.games)
                .into_iter()
                .filter_map(|saved| {
                    let current = by_id.get(&saved.id)?;
                    placed.insert(saved.id).then(|| (*current).clone())
                })
                .collect();
            tier
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/tiers_tests.rs"]
mod tests;
