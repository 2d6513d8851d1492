//! Sorting and filtering for the tracked-games listing.

use std::collections::BTreeSet;

use game_shelf_core::Game;

/// Order of the tracked-games listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerSort {
    /// Order in which games were followed
    DateTracked,
    /// A-Z by name, ignoring case
    #[default]
    Alphabetical,
    /// Z-A by name, ignoring case
    ReverseAlphabetical,
}

impl TrackerSort {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DateTracked => "Date of Tracking",
            Self::Alphabetical => "A-Z",
            Self::ReverseAlphabetical => "Z-A",
        }
    }
}

/// Error returned when a string cannot be parsed into a `TrackerSort`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown sort order: '{0}' (expected tracked, az or za)")]
pub struct TrackerSortParseError(pub String);

impl std::str::FromStr for TrackerSort {
    type Err = TrackerSortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tracked" | "date" | "default" => Ok(Self::DateTracked),
            "az" | "a-z" | "alphabetical" => Ok(Self::Alphabetical),
            "za" | "z-a" | "reverse" | "reverse-alphabetical" => Ok(Self::ReverseAlphabetical),
            _ => Err(TrackerSortParseError(s.to_string())),
        }
    }
}

/// Which owned platform the listing is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(String),
}

impl PlatformFilter {
    pub fn matches(&self, game: &Game) -> bool {
        match self {
            Self::All => true,
            Self::Only(platform) => game.owns_platform(platform),
        }
    }
}

impl From<Option<String>> for PlatformFilter {
    fn from(platform: Option<String>) -> Self {
        match platform {
            Some(p) if p != "all" => Self::Only(p),
            _ => Self::All,
        }
    }
}

/// Sorted, de-duplicated list of every platform the user owns a game on.
pub fn owned_platforms(games: &[Game]) -> Vec<&str> {
    games
        .iter()
        .flat_map(|g| g.selected_platforms.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Games passing `filter`, ordered by `sort`.
pub fn tracker_view<'a>(
    games: &'a [Game],
    sort: TrackerSort,
    filter: &PlatformFilter,
) -> Vec<&'a Game> {
    let mut shown: Vec<&Game> = games.iter().filter(|g| filter.matches(g)).collect();
    match sort {
        TrackerSort::DateTracked => {}
        TrackerSort::Alphabetical => shown.sort_by_key(|g| g.name.to_lowercase()),
        TrackerSort::ReverseAlphabetical => {
            shown.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
    }
    shown
}
