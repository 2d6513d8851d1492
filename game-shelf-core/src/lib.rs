//! Data model shared by every game-shelf crate.
//!
//! A [`Game`] carries the catalog fields returned by a search plus the
//! user's local annotations; a [`Tier`] is one rank row of the tier list.

pub mod game;
pub mod tier;

pub use game::{Game, GameId, GameIdParseError, NOT_AVAILABLE};
pub use tier::{Tier, TierId, TierIdParseError, default_tiers};
