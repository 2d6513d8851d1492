use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_lib::{
    ActiveView, Annotations, Game, GameId, KeyValueStore, PlatformChange, PlatformFilter, Screen,
    Shelf, ShelfError, Statistics, TrackerSort, owned_platforms, tracker_view,
};

use crate::commands::{confirm, game_heading};
use crate::error::CliError;

const BAR_WIDTH: usize = 30;

/// Open the shelf on the tracker screen.
fn open_tracker(store: Arc<dyn KeyValueStore>) -> Shelf {
    let mut shelf = Shelf::open(store);
    shelf.navigate(Screen::Tracker);
    shelf
}

fn followed(shelf: &Shelf, id: GameId) -> Result<&Game, CliError> {
    shelf
        .collection()
        .get(id)
        .ok_or(CliError::Shelf(ShelfError::GameNotFound(id)))
}

fn status_badges(game: &Game) -> String {
    let mut badges = Vec::new();
    if game.completed {
        badges.push(format!("{}", "✔ completed".if_supports_color(Stdout, |t| t.green())));
    }
    if game.platinum {
        badges.push(format!("{}", "🏆 platinum".if_supports_color(Stdout, |t| t.yellow())));
    }
    badges.join("  ")
}

/// List followed games, sorted and optionally filtered by owned platform.
pub(crate) fn run_shelf(
    store: Arc<dyn KeyValueStore>,
    sort: TrackerSort,
    platform: Option<String>,
) -> Result<(), CliError> {
    let shelf = open_tracker(store);
    let ActiveView::Tracker { collection, statistics } = shelf.active_view() else {
        return Ok(());
    };

    if collection.is_empty() {
        log::info!(
            "{}",
            "Your shelf is empty. Search for games and follow them to start tracking."
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    let filter = PlatformFilter::from(platform);
    let shown = tracker_view(collection, sort, &filter);

    log::info!(
        "{} ({} followed, {} completed, sorted {})",
        Screen::Tracker.label().if_supports_color(Stdout, |t| t.bold()),
        statistics.total_games,
        statistics.completed_games,
        sort.label(),
    );
    if let PlatformFilter::Only(name) = &filter {
        log::info!("Platform: {}", name.if_supports_color(Stdout, |t| t.cyan()));
    }
    crate::log_blank();

    if shown.is_empty() {
        let owned = owned_platforms(collection);
        log::info!("No games owned on that platform.");
        if !owned.is_empty() {
            log::info!("Owned platforms: {}", owned.join(", "));
        }
        return Ok(());
    }

    for game in shown {
        let badges = status_badges(game);
        if badges.is_empty() {
            log::info!("  {}", game_heading(game));
        } else {
            log::info!("  {}  {}", game_heading(game), badges);
        }
        if !game.selected_platforms.is_empty() {
            log::info!(
                "      Owned on: {}",
                game.selected_platforms
                    .join(", ")
                    .if_supports_color(Stdout, |t| t.cyan()),
            );
        }
    }
    Ok(())
}

/// Show one followed game in full.
pub(crate) fn run_show(store: Arc<dyn KeyValueStore>, id: GameId) -> Result<(), CliError> {
    let shelf = open_tracker(store);
    let game = followed(&shelf, id)?;

    log::info!("{}", game_heading(game));
    crate::log_blank();
    log::info!("  Release:     {}", game.release_display());
    log::info!("  Metacritic:  {}", game.metacritic_display());
    log::info!("  Completed:   {}", if game.completed { "yes" } else { "no" });
    log::info!("  Platinum:    {}", if game.platinum { "yes" } else { "no" });

    if game.platforms_available.is_empty() {
        log::info!("  Platforms:   {}", game.platforms_display());
    } else {
        log::info!("  Platforms:");
        for platform in &game.platforms_available {
            if game.owns_platform(platform) {
                log::info!(
                    "    {} {}",
                    "■".if_supports_color(Stdout, |t| t.green()),
                    platform.if_supports_color(Stdout, |t| t.bold()),
                );
            } else {
                log::info!("    {} {}", "□".if_supports_color(Stdout, |t| t.dimmed()), platform);
            }
        }
    }

    let placement = match shelf.tiers().tier_of(id) {
        Some(tier) => tier.to_string(),
        None if game.is_board_eligible() => "unassigned".to_string(),
        None => "not on the board (no cover image)".to_string(),
    };
    log::info!("  Tier:        {}", placement);

    if !game.description.trim().is_empty() {
        crate::log_blank();
        log::info!("{}", game.description.trim());
    }
    Ok(())
}

/// Update completion, platinum status and owned platforms of a followed game.
///
/// All changes are committed together; a rejected platform leaves the game
/// untouched.
pub(crate) fn run_mark(
    store: Arc<dyn KeyValueStore>,
    id: GameId,
    completed: Option<bool>,
    platinum: Option<bool>,
    platforms: &[String],
) -> Result<(), CliError> {
    let annotations = Annotations {
        completed,
        platinum,
        toggle_platforms: platforms.to_vec(),
    };
    if annotations.is_empty() {
        return Err(CliError::other(
            "Nothing to change. Pass --completed, --platinum or --platform.",
        ));
    }

    let mut shelf = open_tracker(store);
    let (game, changes) = shelf.update_collection(|c| c.annotate(id, &annotations))?;

    if let Some(completed) = completed {
        log::info!(
            "  {} {}",
            "Completed:".if_supports_color(Stdout, |t| t.bold()),
            if completed { "yes" } else { "no" },
        );
    }
    if let Some(platinum) = platinum {
        log::info!(
            "  {} {}",
            "Platinum:".if_supports_color(Stdout, |t| t.bold()),
            if platinum { "yes" } else { "no" },
        );
    }
    for (platform, change) in platforms.iter().zip(changes) {
        match change {
            PlatformChange::Added => log::info!(
                "  {} {}",
                "+".if_supports_color(Stdout, |t| t.green()),
                platform,
            ),
            PlatformChange::Removed => log::info!(
                "  {} {}",
                "-".if_supports_color(Stdout, |t| t.red()),
                platform,
            ),
        }
    }

    log::info!(
        "{} Updated {}",
        "✔".if_supports_color(Stdout, |t| t.green()),
        game.name.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

/// Stop following a game after confirmation.
pub(crate) fn run_unfollow(
    store: Arc<dyn KeyValueStore>,
    id: GameId,
    yes: bool,
) -> Result<(), CliError> {
    let mut shelf = open_tracker(store);
    let name = followed(&shelf, id)?.name.clone();

    if !confirm(&format!("Stop following {name}?"), yes)? {
        log::info!("Cancelled, {name} stays on your shelf.");
        return Ok(());
    }

    shelf.update_collection(|c| c.unfollow(id))?;
    log::info!(
        "{} Unfollowed {}",
        "✔".if_supports_color(Stdout, |t| t.green()),
        name.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

/// Print the statistics panel.
pub(crate) fn run_stats(store: Arc<dyn KeyValueStore>) -> Result<(), CliError> {
    let shelf = open_tracker(store);
    let ActiveView::Tracker { statistics, .. } = shelf.active_view() else {
        return Ok(());
    };
    print_statistics(&statistics);
    Ok(())
}

fn print_statistics(stats: &Statistics) {
    log::info!("{}", "Statistics".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    log::info!("  Total games:   {}", stats.total_games);
    log::info!(
        "  Completed:     {} ({:.0}%)",
        stats.completed_games,
        stats.completion_percent(),
    );
    log::info!("  In progress:   {}", stats.in_progress_games());
    log::info!("  Platinum:      {}", stats.platinum_games);
    log::info!("  No platinum:   {}", stats.without_platinum());

    if stats.platform_counts.is_empty() {
        return;
    }
    crate::log_blank();
    log::info!("{}", "Games per platform".if_supports_color(Stdout, |t| t.bold()));
    let widest = stats.platform_counts.keys().map(|p| p.chars().count()).max().unwrap_or(0);
    let most = stats.platform_counts.values().copied().max().unwrap_or(1).max(1);
    for (platform, count) in &stats.platform_counts {
        let bar = "█".repeat((count * BAR_WIDTH).div_ceil(most));
        log::info!(
            "  {:<widest$}  {} {}",
            platform,
            bar.if_supports_color(Stdout, |t| t.cyan()),
            count,
        );
    }
}
