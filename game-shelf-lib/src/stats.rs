//! Aggregate counts over the followed-games collection.

use std::collections::BTreeMap;

use game_shelf_core::Game;

/// Counts derived from a collection. Recomputed on every read; nothing is
/// maintained incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statistics {
    pub total_games: usize,
    pub completed_games: usize,
    pub platinum_games: usize,
    /// Owned-platform name to number of games owned on it. Names are taken
    /// verbatim, so differently spelled platforms count separately.
    pub platform_counts: BTreeMap<String, usize>,
}

impl Statistics {
    pub fn from_games(games: &[Game]) -> Self {
        let mut platform_counts = BTreeMap::new();
        for platform in games.iter().flat_map(|g| &g.selected_platforms) {
            *platform_counts.entry(platform.clone()).or_insert(0) += 1;
        }

        Self {
            total_games: games.len(),
            completed_games: games.iter().filter(|g| g.completed).count(),
            platinum_games: games.iter().filter(|g| g.platinum).count(),
            platform_counts,
        }
    }

    pub fn in_progress_games(&self) -> usize {
        self.total_games - self.completed_games
    }

    pub fn without_platinum(&self) -> usize {
        self.total_games - self.platinum_games
    }

    /// Share of completed games in percent, `0.0` for an empty collection.
    pub fn completion_percent(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.completed_games as f64 * 100.0 / self.total_games as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Game> {
        vec![
            Game::new(1, "Alpha")
                .completed(true)
                .with_selected_platforms(["PC"]),
            Game::new(2, "Beta")
                .platinum(true)
                .with_selected_platforms(["PC", "PS5"]),
        ]
    }

    #[test]
    fn two_game_scenario() {
        let stats = Statistics::from_games(&scenario());
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.completed_games, 1);
        assert_eq!(stats.platinum_games, 1);
        assert_eq!(
            stats.platform_counts,
            BTreeMap::from([("PC".to_string(), 2), ("PS5".to_string(), 1)])
        );
    }

    #[test]
    fn derivation_is_repeatable() {
        let games = scenario();
        assert_eq!(Statistics::from_games(&games), Statistics::from_games(&games));
    }

    #[test]
    fn complements_add_up() {
        let stats = Statistics::from_games(&scenario());
        assert_eq!(
            stats.completed_games + stats.in_progress_games(),
            stats.total_games
        );
        assert_eq!(stats.platinum_games + stats.without_platinum(), stats.total_games);
        assert_eq!(stats.completion_percent(), 50.0);
    }

    #[test]
    fn empty_collection() {
        let stats = Statistics::from_games(&[]);
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.completion_percent(), 0.0);
    }

    #[test]
    fn platform_names_are_not_normalized() {
        let games = vec![
            Game::new(1, "A").with_selected_platforms(["PlayStation 5"]),
            Game::new(2, "B").with_selected_platforms(["playstation 5"]),
        ];
        let stats = Statistics::from_games(&games);
        assert_eq!(stats.platform_counts.len(), 2);
    }
}
