//! Screen selection and the wiring between the shelf components.

use std::sync::Arc;

use game_shelf_core::{Game, Tier};

use crate::collection::CollectionStore;
use crate::stats::Statistics;
use crate::storage::KeyValueStore;
use crate::tiers::TierBoard;

// -- Navigation --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Catalog search with follow toggles
    #[default]
    Search,
    /// Followed games, annotations and statistics
    Tracker,
    /// Drag-and-drop tier list
    TierList,
}

const ALL_SCREENS: &[Screen] = &[Screen::Search, Screen::Tracker, Screen::TierList];

impl Screen {
    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Search => "Game Library",
            Self::Tracker => "Player Shelf",
            Self::TierList => "Tier List",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Tracker => "tracker",
            Self::TierList => "tiers",
        }
    }

    pub fn all() -> &'static [Screen] {
        ALL_SCREENS
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Holds which screen is active. Any screen can follow any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewController {
    active: Screen,
}

impl ViewController {
    pub fn new(initial: Screen) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    /// Switch screens, returning the one that was active before.
    pub fn navigate(&mut self, screen: Screen) -> Screen {
        std::mem::replace(&mut self.active, screen)
    }
}

/// What the active screen gets to render.
#[derive(Debug)]
pub enum ActiveView<'a> {
    Search {
        collection: &'a [Game],
    },
    Tracker {
        collection: &'a [Game],
        statistics: Statistics,
    },
    TierList {
        tiers: &'a [Tier],
        unassigned: Vec<&'a Game>,
    },
}

/// The collection store, the tier board and the view controller, kept in
/// step with each other.
pub struct Shelf {
    collection: CollectionStore,
    tiers: TierBoard,
    view: ViewController,
}

impl Shelf {
    /// Load both components from `storage`.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let collection = CollectionStore::load(storage.clone());
        let tiers = TierBoard::load(storage, collection.games());
        Self {
            collection,
            tiers,
            view: ViewController::default(),
        }
    }

    pub fn collection(&self) -> &CollectionStore {
        &self.collection
    }

    pub fn tiers(&self) -> &TierBoard {
        &self.tiers
    }

    /// Tier moves and resets go straight to the board.
    pub fn tiers_mut(&mut self) -> &mut TierBoard {
        &mut self.tiers
    }

    pub fn active_screen(&self) -> Screen {
        self.view.active()
    }

    pub fn navigate(&mut self, screen: Screen) -> Screen {
        self.view.navigate(screen)
    }

    /// Edit the collection, then bring the tier board up to date.
    pub fn update_collection<R>(&mut self, f: impl FnOnce(&mut CollectionStore) -> R) -> R {
        let result = f(&mut self.collection);
        self.tiers.sync_collection(self.collection.games());
        result
    }

    /// Replace the whole collection.
    pub fn commit_collection(&mut self, games: Vec<Game>) {
        self.update_collection(|collection| collection.set_games(games));
    }

    /// Route the collection to the active screen.
    pub fn active_view(&self) -> ActiveView<'_> {
        match self.view.active() {
            Screen::Search => ActiveView::Search {
                collection: self.collection.games(),
            },
            Screen::Tracker => ActiveView::Tracker {
                collection: self.collection.games(),
                statistics: Statistics::from_games(self.collection.games()),
            },
            Screen::TierList => ActiveView::TierList {
                tiers: self.tiers.tiers(),
                unassigned: self.tiers.unassigned(),
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
