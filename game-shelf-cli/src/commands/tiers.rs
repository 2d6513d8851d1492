use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_lib::{ActiveView, GameId, KeyValueStore, Screen, Shelf, Tier, TierId};

use crate::commands::confirm;
use crate::error::CliError;

fn open_board(store: Arc<dyn KeyValueStore>) -> Shelf {
    let mut shelf = Shelf::open(store);
    shelf.navigate(Screen::TierList);
    shelf
}

/// `#rrggbb` to its components.
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn tier_label(tier: &Tier) -> String {
    let label = format!(" {:^3} ", tier.label);
    match parse_hex_color(&tier.color) {
        Some((r, g, b)) => format!(
            "{}",
            label.if_supports_color(Stdout, |t| t.on_truecolor(r, g, b).black().to_string()),
        ),
        None => format!("{}", label.if_supports_color(Stdout, |t| t.bold())),
    }
}

/// Print every tier and the unassigned pool.
pub(crate) fn run_tier_show(store: Arc<dyn KeyValueStore>) -> Result<(), CliError> {
    let shelf = open_board(store);
    let ActiveView::TierList { tiers, unassigned } = shelf.active_view() else {
        return Ok(());
    };

    for tier in tiers {
        let names: Vec<String> = tier
            .games
            .iter()
            .map(|g| format!("{} [{}]", g.name, g.id))
            .collect();
        if names.is_empty() {
            log::info!(
                "{} {}",
                tier_label(tier),
                "(empty)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::info!("{} {}", tier_label(tier), names.join(", "));
        }
    }

    crate::log_blank();
    if unassigned.is_empty() {
        log::info!(
            "{}",
            "Unassigned: none".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        log::info!("{}", "Unassigned:".if_supports_color(Stdout, |t| t.bold()));
        for game in unassigned {
            log::info!("  {} [{}]", game.name, game.id);
        }
    }

    let skipped = shelf.collection().len() - shelf.tiers().games().len();
    if skipped > 0 {
        log::info!(
            "{}",
            format!("{skipped} followed game(s) without a cover image are not shown.")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Move a game from `from` (or the pool) to `to` (or the pool).
pub(crate) fn run_tier_move(
    store: Arc<dyn KeyValueStore>,
    id: GameId,
    from: Option<TierId>,
    to: Option<TierId>,
) -> Result<(), CliError> {
    if from.is_none() && to.is_none() {
        return Err(CliError::other(
            "Nothing to move. Pass --from and/or --to with a tier id.",
        ));
    }

    let mut shelf = open_board(store);
    let name = match shelf.tiers().games().iter().find(|g| g.id == id) {
        Some(game) => game.name.clone(),
        None => {
            return Err(CliError::other(format!(
                "Game {id} is not on the tier list (not followed, or it has no cover image)"
            )));
        }
    };
    if let Some(to) = to.as_ref().filter(|t| shelf.tiers().tier(t).is_none()) {
        log::warn!("Tier {to} does not exist");
    }

    match shelf.tiers_mut().move_game(id, from.as_ref(), to.as_ref()) {
        Some(tier) => log::info!(
            "{} {} is now in tier {}",
            "→".if_supports_color(Stdout, |t| t.cyan()),
            name.if_supports_color(Stdout, |t| t.bold()),
            tier.if_supports_color(Stdout, |t| t.bold()),
        ),
        None => log::info!(
            "{} {} is in the unassigned pool",
            "→".if_supports_color(Stdout, |t| t.cyan()),
            name.if_supports_color(Stdout, |t| t.bold()),
        ),
    }
    Ok(())
}

/// Empty all tiers after confirmation.
pub(crate) fn run_tier_reset(store: Arc<dyn KeyValueStore>, yes: bool) -> Result<(), CliError> {
    let mut shelf = open_board(store);
    if !confirm("Reset the tier list? Every game goes back to the pool.", yes)? {
        log::info!("Cancelled, the tier list is unchanged.");
        return Ok(());
    }
    shelf.tiers_mut().reset();
    log::info!(
        "{} Tier list reset",
        "✔".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stock_tier_colors() {
        assert_eq!(parse_hex_color("#ff7f7f"), Some((0xff, 0x7f, 0x7f)));
        assert_eq!(parse_hex_color("#B0B0B0"), Some((0xb0, 0xb0, 0xb0)));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(parse_hex_color("ff7f7f"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }
}
