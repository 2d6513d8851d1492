//! Local state of the game shelf: the followed-games collection, the tier
//! list, statistics and the screen wiring between them.
//!
//! Everything persistent goes through a [`KeyValueStore`] injected at
//! construction, so tests can swap the file store for a [`MemoryStore`].

pub mod collection;
pub mod error;
pub mod recent;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod tiers;
pub mod tracker;
pub mod view;

pub use game_shelf_core::{Game, GameId, Tier, TierId, default_tiers};

pub use collection::{Annotations, CollectionStore, FollowChange, PlatformChange};
pub use error::{ShelfError, StorageError};
pub use recent::LastSearch;
pub use settings::ConfigSource;
pub use stats::Statistics;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use tiers::TierBoard;
pub use tracker::{PlatformFilter, TrackerSort, owned_platforms, tracker_view};
pub use view::{ActiveView, Screen, Shelf, ViewController};
