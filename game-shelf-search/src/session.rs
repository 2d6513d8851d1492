//! Displayed search results with stale-response protection.
//!
//! Each search takes a ticket from a monotonically increasing counter.
//! A response is applied only if its ticket is the latest one issued, so a
//! slow earlier search can never overwrite the results of a later one.

use game_shelf_core::{Game, GameId};

use crate::client::SearchClient;
use crate::error::SearchError;

/// Sequence number of one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// What the search screen currently shows.
#[derive(Debug, Default)]
pub struct SearchResults {
    issued: u64,
    games: Vec<Game>,
    error: Option<String>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a search about to start.
    pub fn begin(&mut self, term: &str) -> SearchTicket {
        self.issued += 1;
        log::debug!("Issued search #{} for '{term}'", self.issued);
        SearchTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply a finished search. Returns `false` (and changes nothing) when a
    /// newer search has been issued since `ticket`.
    ///
    /// A failure clears the previous results and records the message.
    pub fn apply(&mut self, ticket: SearchTicket, outcome: Result<Vec<Game>, SearchError>) -> bool {
        if !self.is_latest(ticket) {
            log::debug!("Dropping stale search response {:?}", ticket);
            return false;
        }
        match outcome {
            Ok(games) => {
                self.games = games;
                self.error = None;
            }
            Err(e) => {
                self.games.clear();
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Run one search against `client` and apply its outcome.
    pub async fn run(&mut self, client: &SearchClient, term: &str) -> Result<&[Game], &str> {
        let ticket = self.begin(term);
        let outcome = client.search(term).await;
        self.apply(ticket, outcome);
        match &self.error {
            Some(message) => Err(message.as_str()),
            None => Ok(self.games.as_slice()),
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(ids: &[u64]) -> Vec<Game> {
        ids.iter().map(|id| Game::new(*id, format!("Game {id}"))).collect()
    }

    #[test]
    fn latest_search_wins_over_slower_earlier_one() {
        let mut results = SearchResults::new();
        let first = results.begin("zel");
        let second = results.begin("zelda");

        assert!(results.apply(second, Ok(games(&[2]))));
        assert!(!results.apply(first, Ok(games(&[1]))));

        assert_eq!(results.games().len(), 1);
        assert!(results.find(GameId(2)).is_some());
    }

    #[test]
    fn tickets_increase() {
        let mut results = SearchResults::new();
        let a = results.begin("a");
        let b = results.begin("b");
        assert!(b > a);
        assert!(!results.is_latest(a));
        assert!(results.is_latest(b));
    }

    #[test]
    fn failure_clears_previous_results() {
        let mut results = SearchResults::new();
        let ok = results.begin("mario");
        results.apply(ok, Ok(games(&[1, 2])));

        let failed = results.begin("");
        results.apply(failed, Err(SearchError::Validation));
        assert!(results.games().is_empty());
        assert_eq!(results.error(), Some("At least one letter required!"));
    }

    #[test]
    fn success_clears_previous_error() {
        let mut results = SearchResults::new();
        let failed = results.begin("x");
        results.apply(
            failed,
            Err(SearchError::Upstream {
                status: 500,
                message: "down".to_string(),
            }),
        );
        let ok = results.begin("x");
        results.apply(ok, Ok(games(&[3])));
        assert!(results.error().is_none());
        assert_eq!(results.games().len(), 1);
    }
}
