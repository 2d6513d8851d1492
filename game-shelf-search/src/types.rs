use serde::Deserialize;
use serde_json::Value;

use game_shelf_core::{Game, GameId};

/// One search result as returned by `/api/games`.
///
/// The backend passes catalog fields through with little shaping, so most
/// fields are optional and a few arrive in more than one form. Fields the
/// shelf has no use for (such as `rating`, which may be a number or "N/A")
/// are ignored.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GameRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// Date string, or a Unix timestamp in seconds.
    #[serde(default)]
    pub release: Option<Value>,
    #[serde(default)]
    pub cover: Option<String>,
    /// Number, numeric string, "N/A" or null.
    #[serde(default)]
    pub metacritic: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    /// Array of names, or one comma-separated string.
    #[serde(default)]
    pub platforms: Option<Value>,
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Present only in non-production backend deployments.
    #[serde(default)]
    pub stack: Option<String>,
}

impl GameRecord {
    /// Shape the record into a [`Game`] with no local annotations.
    pub fn into_game(self) -> Game {
        Game {
            id: GameId(self.id),
            name: self.name.unwrap_or_default(),
            release_date: self.release.as_ref().and_then(release_date),
            image_url: self.cover.as_deref().and_then(cover_url),
            platforms_available: self.platforms.as_ref().map(platform_names).unwrap_or_default(),
            metacritic_score: self.metacritic.as_ref().map(score).unwrap_or(0),
            description: self.description.unwrap_or_default(),
            ..Game::default()
        }
    }
}

fn release_date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => {
            let secs = n.as_i64()?;
            chrono::DateTime::from_timestamp(secs, 0).map(|d| d.format("%Y-%m-%d").to_string())
        }
        _ => None,
    }
}

/// Empty covers count as missing; protocol-relative URLs get `https:`.
fn cover_url(cover: &str) -> Option<String> {
    let cover = cover.trim();
    if cover.is_empty() {
        None
    } else if cover.starts_with("//") {
        Some(format!("https:{cover}"))
    } else {
        Some(cover.to_string())
    }
}

fn platform_names(value: &Value) -> Vec<String> {
    let names: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .collect(),
        Value::String(joined) => joined.split(',').map(|s| s.trim().to_string()).collect(),
        _ => Vec::new(),
    };
    names
        .into_iter()
        .filter(|n| !n.is_empty() && n != game_shelf_core::NOT_AVAILABLE)
        .collect()
}

/// Unrated titles (null, "N/A", negative, garbage) score 0.
fn score(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => v.round().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Game {
        serde_json::from_str::<GameRecord>(json).unwrap().into_game()
    }

    #[test]
    fn full_record_maps_every_field() {
        let game = record(
            r#"{"id": 1942, "name": "The Witcher 3", "release": "2015-05-19",
                "cover": "https://img.test/w3.jpg", "rating": 92.4, "metacritic": 93,
                "description": "Monster hunting.", "platforms": ["PC", "PlayStation 4"]}"#,
        );
        assert_eq!(game.id, GameId(1942));
        assert_eq!(game.name, "The Witcher 3");
        assert_eq!(game.release_date.as_deref(), Some("2015-05-19"));
        assert_eq!(game.image_url.as_deref(), Some("https://img.test/w3.jpg"));
        assert_eq!(game.platforms_available, vec!["PC", "PlayStation 4"]);
        assert_eq!(game.metacritic_score, 93);
        assert_eq!(game.description, "Monster hunting.");
        assert!(game.selected_platforms.is_empty());
        assert!(!game.completed && !game.platinum);
    }

    #[test]
    fn nulls_become_defaults() {
        let game = record(
            r#"{"id": 5, "name": "Obscure", "release": null, "cover": null,
                "rating": null, "metacritic": null, "description": null, "platforms": null}"#,
        );
        assert_eq!(game.release_date, None);
        assert_eq!(game.image_url, None);
        assert!(game.platforms_available.is_empty());
        assert_eq!(game.metacritic_score, 0);
        assert_eq!(game.metacritic_display(), "N/A");
        assert_eq!(game.platforms_display(), "N/A");
        assert_eq!(game.description, "");
    }

    #[test]
    fn heterogeneous_fields_are_normalized() {
        let game = record(
            r#"{"id": 6, "release": 1431993600, "cover": "//images.test/c.jpg",
                "metacritic": "N/A", "platforms": "PC, Xbox One, "}"#,
        );
        assert_eq!(game.release_date.as_deref(), Some("2015-05-19"));
        assert_eq!(game.image_url.as_deref(), Some("https://images.test/c.jpg"));
        assert_eq!(game.metacritic_score, 0);
        assert_eq!(game.platforms_available, vec!["PC", "Xbox One"]);
    }

    #[test]
    fn numeric_string_scores_are_parsed() {
        assert_eq!(record(r#"{"id": 1, "metacritic": "87"}"#).metacritic_score, 87);
        assert_eq!(record(r#"{"id": 1, "metacritic": 86.6}"#).metacritic_score, 87);
        assert_eq!(record(r#"{"id": 1, "metacritic": -3}"#).metacritic_score, 0);
    }

    #[test]
    fn unrated_titles_do_not_break_the_batch() {
        let games: Vec<Game> = serde_json::from_str::<Vec<GameRecord>>(
            r#"[{"id": 7, "name": "Unrated", "rating": "N/A", "metacritic": "N/A",
                 "platforms": ["PC"]},
                {"id": 8, "name": "Rated", "rating": 4.5, "metacritic": 81}]"#,
        )
        .unwrap()
        .into_iter()
        .map(GameRecord::into_game)
        .collect();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].metacritic_score, 0);
        assert_eq!(games[0].platforms_available, vec!["PC"]);
        assert_eq!(games[1].metacritic_score, 81);
    }

    #[test]
    fn empty_cover_is_missing() {
        assert_eq!(record(r#"{"id": 1, "cover": "  "}"#).image_url, None);
    }

    #[test]
    fn error_body_stack_is_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(body.error, "boom");
        assert!(body.stack.is_none());
    }
}
