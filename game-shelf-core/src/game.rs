use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown wherever the catalog had no value for a field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Stable identifier of a game in the external catalog.
///
/// `0` is never issued by the catalog and stands for "no stable identifier";
/// such games cannot be joined against and stay off the tier board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl GameId {
    pub fn is_stable(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Error returned when a string cannot be parsed into a `GameId`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid game id: '{0}'")]
pub struct GameIdParseError(pub String);

impl std::str::FromStr for GameId {
    type Err = GameIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(id) if id != 0 => Ok(Self(id)),
            _ => Err(GameIdParseError(s.to_string())),
        }
    }
}

/// A catalog game plus the annotations the user keeps for it locally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub id: GameId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub release_date: Option<String>,

    /// Cover art URL. Catalog entries without a cover are never placed on
    /// the tier board.
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,

    /// Platforms reported by the catalog, in catalog order. Older saves
    /// store them as one comma-joined `platforms` string.
    #[serde(default, alias = "platforms", deserialize_with = "platform_list")]
    pub platforms_available: Vec<String>,

    /// Metacritic score; `0` for unrated titles. Older saves use
    /// `metacritic` with a number, a numeric string, "N/A" or null.
    #[serde(default, alias = "metacritic", deserialize_with = "lenient_score")]
    pub metacritic_score: u32,

    #[serde(default)]
    pub description: String,

    // -- Local annotations --
    /// Platforms the user owns the game on. Ordered, no duplicates, and
    /// always a subset of `platforms_available`.
    #[serde(default)]
    pub selected_platforms: Vec<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub platinum: bool,
}

impl Game {
    pub fn new(id: impl Into<GameId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    pub fn with_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms_available = platforms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_selected_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metacritic(mut self, score: u32) -> Self {
        self.metacritic_score = score;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn platinum(mut self, platinum: bool) -> Self {
        self.platinum = platinum;
        self
    }

    /// Whether the game may appear on the tier board: it needs a stable id
    /// (the only join key) and a cover image to drag around.
    pub fn is_board_eligible(&self) -> bool {
        self.id.is_stable() && self.image_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn owns_platform(&self, platform: &str) -> bool {
        self.selected_platforms.iter().any(|p| p == platform)
    }

    pub fn offers_platform(&self, platform: &str) -> bool {
        self.platforms_available.iter().any(|p| p == platform)
    }

    /// Catalog platforms joined for display, or "N/A" when none were reported.
    pub fn platforms_display(&self) -> String {
        if self.platforms_available.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.platforms_available.join(", ")
        }
    }

    pub fn metacritic_display(&self) -> String {
        if self.metacritic_score == 0 {
            NOT_AVAILABLE.to_string()
        } else {
            self.metacritic_score.to_string()
        }
    }

    pub fn release_display(&self) -> &str {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }
}

// -- Lenient field decoding --

#[derive(Deserialize)]
#[serde(untagged)]
enum PlatformField {
    List(Vec<String>),
    Joined(String),
    Other(IgnoredAny),
}

fn platform_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let names: Vec<String> = match Option::<PlatformField>::deserialize(deserializer)? {
        Some(PlatformField::List(names)) => names,
        Some(PlatformField::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
        Some(PlatformField::Other(_)) | None => Vec::new(),
    };
    Ok(names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && n != NOT_AVAILABLE)
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreField {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = match Option::<ScoreField>::deserialize(deserializer)? {
        Some(ScoreField::Number(n)) => Some(n),
        Some(ScoreField::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(ScoreField::Other(_)) | None => None,
    };
    Ok(match raw {
        Some(v) if v.is_finite() && v > 0.0 => v.round().min(u32::MAX as f64) as u32,
        _ => 0,
    })
}

#[cfg(test)]
#[path = "tests/game_tests.rs"]
mod tests;
