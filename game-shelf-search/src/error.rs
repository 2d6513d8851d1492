/// Errors that can occur while searching the catalog.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("At least one letter required!")]
    Validation,

    #[error("Search failed (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Whether the error was caught before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation)
    }
}
