//! Persisted collection of followed games.
//!
//! All changes go through [`CollectionStore::set_games`], which replaces
//! the whole list and writes it to storage. The editing helpers compute
//! the complete next list first and commit it in one step.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use game_shelf_core::{Game, GameId};

use crate::error::ShelfError;
use crate::storage::{COLLECTION_KEY, KeyValueStore, SCHEMA_VERSION, load_json, persist_json};

/// On-disk shape of the collection. Older payloads are a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCollection {
    Versioned { version: u32, games: Vec<Game> },
    Legacy(Vec<Game>),
}

#[derive(Serialize)]
struct CollectionRecord<'a> {
    version: u32,
    games: &'a [Game],
}

/// What a follow toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowChange {
    Followed,
    Unfollowed,
}

/// What a platform toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformChange {
    Added,
    Removed,
}

/// Annotation changes for one game, committed together by
/// [`CollectionStore::annotate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub completed: Option<bool>,
    pub platinum: Option<bool>,
    /// Owned platforms to toggle, in order.
    pub toggle_platforms: Vec<String>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.completed.is_none() && self.platinum.is_none() && self.toggle_platforms.is_empty()
    }
}

pub struct CollectionStore {
    storage: Arc<dyn KeyValueStore>,
    games: Vec<Game>,
}

impl CollectionStore {
    /// Load the collection from storage, starting empty when nothing usable
    /// was saved.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let games = match load_json::<StoredCollection>(storage.as_ref(), COLLECTION_KEY) {
            Some(StoredCollection::Versioned { version, games }) if version <= SCHEMA_VERSION => {
                games
            }
            Some(StoredCollection::Versioned { version, .. }) => {
                log::warn!(
                    "Saved collection has unsupported schema version {version}, starting empty"
                );
                Vec::new()
            }
            Some(StoredCollection::Legacy(games)) => games,
            None => Vec::new(),
        };
        Self {
            storage,
            games: dedup_by_id(games),
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn is_following(&self, id: GameId) -> bool {
        self.get(id).is_some()
    }

    /// Replace the whole collection and persist it. Later duplicates of an
    /// id are dropped.
    pub fn set_games(&mut self, games: Vec<Game>) {
        self.games = dedup_by_id(games);
        persist_json(
            self.storage.as_ref(),
            COLLECTION_KEY,
            &CollectionRecord {
                version: SCHEMA_VERSION,
                games: &self.games,
            },
        );
    }

    /// Follow a search result, or unfollow it if it is already followed.
    pub fn toggle_follow(&mut self, game: &Game) -> FollowChange {
        if self.is_following(game.id) {
            let next = self
                .games
                .iter()
                .filter(|g| g.id != game.id)
                .cloned()
                .collect();
            self.set_games(next);
            FollowChange::Unfollowed
        } else {
            let mut next = self.games.clone();
            next.push(game.clone());
            self.set_games(next);
            FollowChange::Followed
        }
    }

    /// Remove a followed game, returning it.
    pub fn unfollow(&mut self, id: GameId) -> Result<Game, ShelfError> {
        let removed = self.get(id).cloned().ok_or(ShelfError::GameNotFound(id))?;
        let next = self.games.iter().filter(|g| g.id != id).cloned().collect();
        self.set_games(next);
        Ok(removed)
    }

    pub fn set_completed(&mut self, id: GameId, completed: bool) -> Result<Game, ShelfError> {
        self.edit(id, |game| {
            game.completed = completed;
            Ok(())
        })
    }

    pub fn set_platinum(&mut self, id: GameId, platinum: bool) -> Result<Game, ShelfError> {
        self.edit(id, |game| {
            game.platinum = platinum;
            Ok(())
        })
    }

    /// Mark a platform as owned, or un-mark it if it already was.
    ///
    /// Only platforms the catalog lists for the game are accepted.
    pub fn toggle_platform(
        &mut self,
        id: GameId,
        platform: &str,
    ) -> Result<PlatformChange, ShelfError> {
        let mut change = PlatformChange::Added;
        self.edit(id, |game| {
            change = toggle_owned(game, platform)?;
            Ok(())
        })?;
        Ok(change)
    }

    /// Apply every change in `annotations` to one game and commit once.
    ///
    /// A rejected platform fails the whole edit and nothing is committed.
    /// Returns the updated game and the outcome of each platform toggle.
    pub fn annotate(
        &mut self,
        id: GameId,
        annotations: &Annotations,
    ) -> Result<(Game, Vec<PlatformChange>), ShelfError> {
        let mut changes = Vec::with_capacity(annotations.toggle_platforms.len());
        let game = self.edit(id, |game| {
            if let Some(completed) = annotations.completed {
                game.completed = completed;
            }
            if let Some(platinum) = annotations.platinum {
                game.platinum = platinum;
            }
            for platform in &annotations.toggle_platforms {
                changes.push(toggle_owned(game, platform)?);
            }
            Ok(())
        })?;
        Ok((game, changes))
    }

    /// Apply `f` to a copy of one game and commit the collection with the
    /// edited copy in its place.
    fn edit<F>(&mut self, id: GameId, f: F) -> Result<Game, ShelfError>
    where
        F: FnOnce(&mut Game) -> Result<(), ShelfError>,
    {
        let mut updated = self.get(id).cloned().ok_or(ShelfError::GameNotFound(id))?;
        f(&mut updated)?;
        let next = self
            .games
            .iter()
            .map(|g| if g.id == id { updated.clone() } else { g.clone() })
            .collect();
        self.set_games(next);
        Ok(updated)
    }
}

fn toggle_owned(game: &mut Game, platform: &str) -> Result<PlatformChange, ShelfError> {
    if !game.offers_platform(platform) {
        return Err(ShelfError::unknown_platform(&game.name, platform));
    }
    if game.owns_platform(platform) {
        game.selected_platforms.retain(|p| p != platform);
        Ok(PlatformChange::Removed)
    } else {
        game.selected_platforms.push(platform.to_string());
        Ok(PlatformChange::Added)
    }
}

fn dedup_by_id(games: Vec<Game>) -> Vec<Game> {
    let mut seen = HashSet::new();
    let before = games.len();
    let games: Vec<Game> = games.into_iter().filter(|g| seen.insert(g.id)).collect();
    if games.len() != before {
        log::debug!("Dropped {} duplicate collection entries", before - games.len());
    }
    games
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
