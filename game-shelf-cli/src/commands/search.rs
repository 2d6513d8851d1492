use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_lib::{
    ActiveView, FollowChange, Game, GameId, KeyValueStore, LastSearch, Screen, Shelf,
};
use game_shelf_search::{SearchClient, SearchConfig, SearchResults};

use crate::commands::{game_heading, truncate};
use crate::error::CliError;
use crate::spinner;

const DESCRIPTION_PREVIEW: usize = 160;

/// Search the catalog and remember the results for `follow`.
pub(crate) fn run_search(
    store: Arc<dyn KeyValueStore>,
    term: &str,
    api_url: Option<String>,
    quiet: bool,
) -> Result<(), CliError> {
    game_shelf_search::validate_term(term)?;

    let config = SearchConfig::load()?.with_base_url(api_url)?;
    let client = SearchClient::new(&config)?;
    log::debug!("Searching {} for '{}'", client.base_url(), term);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;

    let pb = spinner::start(quiet, format!("Searching for '{term}'..."));
    let mut results = SearchResults::new();
    let outcome = rt
        .block_on(results.run(&client, term))
        .map(<[Game]>::to_vec)
        .map_err(str::to_string);
    pb.finish_and_clear();

    let games = match outcome {
        Ok(games) => games,
        Err(message) => {
            LastSearch::clear(store.as_ref());
            return Err(CliError::other(message));
        }
    };
    LastSearch::new(term, games.clone()).save(store.as_ref());

    let mut shelf = Shelf::open(store);
    shelf.navigate(Screen::Search);
    let ActiveView::Search { collection } = shelf.active_view() else {
        return Ok(());
    };

    if games.is_empty() {
        log::info!("{}", "Game not found!".if_supports_color(Stdout, |t| t.yellow()));
        return Ok(());
    }

    log::info!(
        "{} result(s) for '{}':",
        games.len(),
        term.if_supports_color(Stdout, |t| t.cyan()),
    );
    for game in &games {
        crate::log_blank();
        let followed = collection.iter().any(|g| g.id == game.id);
        print_result(game, followed);
    }
    crate::log_blank();
    log::info!(
        "{}",
        "Use 'game-shelf follow <id>' to add a game to your shelf."
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

fn print_result(game: &Game, followed: bool) {
    let marker = if followed {
        format!("{}", "♥".if_supports_color(Stdout, |t| t.red()))
    } else {
        format!("{}", "♡".if_supports_color(Stdout, |t| t.dimmed()))
    };
    log::info!("  {} {}", marker, game_heading(game));
    log::info!("      Release:     {}", game.release_display());
    log::info!("      Platforms:   {}", game.platforms_display());
    log::info!("      Metacritic:  {}", game.metacritic_display());
    if !game.description.trim().is_empty() {
        log::info!(
            "      {}",
            truncate(&game.description, DESCRIPTION_PREVIEW)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Follow (or unfollow) a game from the last search results.
pub(crate) fn run_follow(store: Arc<dyn KeyValueStore>, id: GameId) -> Result<(), CliError> {
    let last = LastSearch::load(store.as_ref()).ok_or_else(|| {
        CliError::other("No search results yet. Run 'game-shelf search <term>' first.")
    })?;
    let game = last.find(id).cloned().ok_or_else(|| {
        CliError::other(format!(
            "Game {id} was not in the last search results for '{}'",
            last.term
        ))
    })?;

    let mut shelf = Shelf::open(store);
    shelf.navigate(Screen::Search);
    match shelf.update_collection(|collection| collection.toggle_follow(&game)) {
        FollowChange::Followed => {
            log::info!(
                "{} Following {}",
                "♥".if_supports_color(Stdout, |t| t.red()),
                game.name.if_supports_color(Stdout, |t| t.bold()),
            );
            if !game.is_board_eligible() {
                log::info!(
                    "  {}",
                    "No cover image, so it won't appear on the tier list."
                        .if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
        FollowChange::Unfollowed => {
            log::info!(
                "{} Unfollowed {}",
                "♡".if_supports_color(Stdout, |t| t.dimmed()),
                game.name.if_supports_color(Stdout, |t| t.bold()),
            );
        }
    }
    Ok(())
}
