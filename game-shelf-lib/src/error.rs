use thiserror::Error;

use game_shelf_core::GameId;

/// Errors raised when editing the followed-games collection.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// The id is not in the collection
    #[error("Game {0} is not on your shelf")]
    GameNotFound(GameId),

    /// The platform is not one the catalog lists for the game
    #[error("'{platform}' is not a platform of {game}")]
    UnknownPlatform { game: String, platform: String },
}

impl ShelfError {
    pub fn unknown_platform(game: impl Into<String>, platform: impl Into<String>) -> Self {
        Self::UnknownPlatform {
            game: game.into(),
            platform: platform.into(),
        }
    }
}

/// Errors raised by a key-value persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error while reading or writing a value
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Keys must be non-empty and limited to `[A-Za-z0-9_-]`
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The backend refuses writes
    #[error("Storage is read-only")]
    ReadOnly,
}
