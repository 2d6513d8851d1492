//! Client for the game-shelf search backend.
//!
//! The backend exposes `GET /api/games?search=<term>` and hides the catalog
//! provider and its credentials; this crate only knows that request and
//! response shape.

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use client::{SearchClient, validate_term};
pub use config::{
    API_URL_ENV, DEFAULT_BASE_URL, SearchConfig, SearchConfigSources, config_sources,
    save_base_url,
};
pub use error::SearchError;
pub use session::{SearchResults, SearchTicket};
pub use types::GameRecord;
