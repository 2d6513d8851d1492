use thiserror::Error;

use game_shelf_lib::{ShelfError, StorageError};
use game_shelf_search::SearchError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The data directory could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Edit rejected by the collection
    #[error("{0}")]
    Shelf(#[from] ShelfError),

    /// Search request failed or was rejected
    #[error("{0}")]
    Search(#[from] SearchError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
