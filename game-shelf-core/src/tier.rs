use serde::{Deserialize, Serialize};

use crate::game::{Game, GameId};

/// Short rank label identifying a tier ("S", "A", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(String);

impl TierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a string cannot be parsed into a `TierId`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid tier id: '{0}'")]
pub struct TierIdParseError(pub String);

impl std::str::FromStr for TierId {
    type Err = TierIdParseError;

    /// Parse a tier label typed by a user. Labels are upper-cased so `s`
    /// and `S` name the same rank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(TierIdParseError(s.to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }
}

/// One rank row of the tier list with the games assigned to it, in drop order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub id: TierId,
    pub label: String,
    pub color: String,
    #[serde(default, alias = "images")]
    pub games: Vec<Game>,
}

impl Tier {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: TierId::new(id),
            label: label.into(),
            color: color.into(),
            games: Vec::new(),
        }
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.games.iter().any(|g| g.id == id)
    }

    pub fn game_ids(&self) -> impl Iterator<Item = GameId> + '_ {
        self.games.iter().map(|g| g.id)
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }
}

/// Rank id, label and color of the stock tier list, best first.
const DEFAULT_TIERS: &[(&str, &str)] = &[
    ("S", "#ff7f7f"),
    ("A", "#ffbf7f"),
    ("B", "#ffff7f"),
    ("C", "#7fff7f"),
    ("D", "#7fbfff"),
    ("E", "#B0B0B0"),
];

/// The six empty stock tiers S through E.
pub fn default_tiers() -> Vec<Tier> {
    DEFAULT_TIERS
        .iter()
        .map(|(id, color)| Tier::new(*id, *id, *color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_six_ranks_in_order() {
        let tiers = default_tiers();
        let ids: Vec<&str> = tiers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["S", "A", "B", "C", "D", "E"]);
        assert!(tiers.iter().all(Tier::is_empty));
    }

    #[test]
    fn tier_id_parse_is_case_insensitive() {
        let parsed: TierId = " s ".parse().unwrap();
        assert_eq!(parsed, TierId::new("S"));
    }

    #[test]
    fn tier_id_rejects_blank_and_spaced() {
        assert!("".parse::<TierId>().is_err());
        assert!("   ".parse::<TierId>().is_err());
        assert!("S A".parse::<TierId>().is_err());
    }

    #[test]
    fn tier_accepts_legacy_images_key() {
        let json =
            r##"{"id":"S","label":"S","color":"#ff7f7f","images":[{"id":7,"name":"Seven"}]}"##;
        let tier: Tier = serde_json::from_str(json).unwrap();
        assert!(tier.contains(GameId(7)));
        assert_eq!(tier.len(), 1);
    }
}
