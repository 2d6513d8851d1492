pub(crate) mod config;
pub(crate) mod screens;
pub(crate) mod search;
pub(crate) mod shelf;
pub(crate) mod tiers;

use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_lib::Game;

use crate::error::CliError;

/// Ask a yes/no question on stdin. Anything but `y`/`yes` declines.
pub(crate) fn confirm(question: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    print!("{question} [y/N]: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// `"[1942] The Witcher 3"` with the id dimmed.
pub(crate) fn game_heading(game: &Game) -> String {
    format!(
        "{} {}",
        format!("[{}]", game.id).if_supports_color(Stdout, |t| t.dimmed()),
        game.name.if_supports_color(Stdout, |t| t.bold()),
    )
}

/// Cut `text` to at most `max` characters, adding an ellipsis when shortened.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES \n"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no\n"));
        assert!(!is_yes("yep\n"));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Pokémon Légendes", 8), "Pokémon…");
        assert_eq!(truncate("Pokémon Légendes", 8).chars().count(), 8);
    }
}
