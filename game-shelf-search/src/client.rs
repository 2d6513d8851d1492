use std::time::Duration;

use game_shelf_core::Game;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{ErrorBody, GameRecord};

/// Message used when a failed response carries no usable error body.
const GENERIC_FAILURE: &str = "An error occurred during the search progress.";

/// HTTP client for the backend's `/api/games` search endpoint.
///
/// Every call is independent: no retries and no caching of results.
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the catalog for `term`.
    ///
    /// An empty term fails with [`SearchError::Validation`] without touching
    /// the network.
    pub async fn search(&self, term: &str) -> Result<Vec<Game>, SearchError> {
        validate_term(term)?;

        log::debug!("Searching catalog for '{term}'");
        let resp = self
            .http
            .get(format!("{}/api/games", self.base_url))
            .query(&[("search", term)])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        log::debug!("Search response status: {status}");

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &text));
        }

        let records: Vec<GameRecord> = serde_json::from_str(&text).map_err(|e| {
            SearchError::Api(format!(
                "Failed to parse search results: {e}. Response: {}",
                preview(&text)
            ))
        })?;

        Ok(records.into_iter().map(GameRecord::into_game).collect())
    }
}

/// Reject terms with no characters at all.
pub fn validate_term(term: &str) -> Result<(), SearchError> {
    if term.is_empty() {
        Err(SearchError::Validation)
    } else {
        Ok(())
    }
}

fn upstream_error(status: u16, body: &str) -> SearchError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => {
            if let Some(stack) = parsed.stack {
                log::debug!("Backend stack trace:\n{stack}");
            }
            parsed.error
        }
        Err(_) => GENERIC_FAILURE.to_string(),
    };
    SearchError::Upstream { status, message }
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}
