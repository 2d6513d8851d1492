use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_lib::Screen;

/// List the screens and the commands that render them.
pub(crate) fn run_screens() {
    log::info!("Screens:");
    crate::log_blank();
    for screen in Screen::all() {
        let commands = match screen {
            Screen::Search => "search, follow",
            Screen::Tracker => "shelf, show, mark, unfollow, stats",
            Screen::TierList => "tier show, tier move, tier reset",
        };
        log::info!(
            "  {} [{}]",
            screen.label().if_supports_color(Stdout, |t| t.bold()),
            screen.short_name().if_supports_color(Stdout, |t| t.cyan()),
        );
        log::info!("    Commands: {}", commands);
    }
}
