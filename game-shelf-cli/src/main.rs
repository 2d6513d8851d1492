//! game-shelf CLI
//!
//! Command-line interface for searching the game catalog, tracking the
//! games you follow and ranking them in a tier list.

mod commands;
mod error;
mod spinner;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use game_shelf_lib::{GameId, JsonFileStore, KeyValueStore, TierId, TrackerSort};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "game-shelf")]
#[command(about = "Search, track and rank your games", long_about = None)]
struct Cli {
    /// Directory holding the saved shelf (defaults to settings, then the user data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Search backend base URL (e.g., http://localhost:3000)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the game catalog
    Search {
        /// Title or part of a title
        term: String,
    },

    /// Follow a game from the last search (or unfollow it if already followed)
    Follow {
        /// Catalog id shown in the search results
        id: GameId,
    },

    /// List the games you follow
    Shelf {
        /// Sort order: tracked, az or za
        #[arg(short, long, default_value = "az")]
        sort: TrackerSort,

        /// Only show games owned on this platform ("all" for every game)
        #[arg(short, long)]
        platform: Option<String>,
    },

    /// Show everything about a followed game
    Show {
        id: GameId,
    },

    /// Update completion, platinum trophy or owned platforms of a followed game
    Mark {
        id: GameId,

        /// Whether the game is completed (true/false)
        #[arg(long)]
        completed: Option<bool>,

        /// Whether the platinum trophy was earned (true/false)
        #[arg(long)]
        platinum: Option<bool>,

        /// Toggle ownership on a platform (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },

    /// Stop following a game
    Unfollow {
        id: GameId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show statistics about your shelf
    Stats,

    /// Rank followed games in a tier list
    Tier {
        #[command(subcommand)]
        action: TierAction,
    },

    /// List the application screens
    Screens,

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TierAction {
    /// Show the tier list and the unassigned pool
    Show,

    /// Move a game between tiers or between a tier and the pool
    Move {
        id: GameId,

        /// Tier the game is taken from (omit for the unassigned pool)
        #[arg(long)]
        from: Option<TierId>,

        /// Tier the game is dropped on (omit to send it to the pool)
        #[arg(long)]
        to: Option<TierId>,
    },

    /// Empty every tier and put all games back in the pool
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the settings file path
    Path,

    /// Set the search backend base URL (omit to clear)
    SetUrl { url: Option<String> },

    /// Set the data directory (omit to clear)
    SetDataDir { dir: Option<PathBuf> },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        data_dir,
        api_url,
        quiet,
        command,
    } = cli;

    match command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(data_dir, api_url),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetUrl { url } => commands::config::run_config_set_url(url),
            ConfigAction::SetDataDir { dir } => commands::config::run_config_set_data_dir(dir),
        },
        Commands::Screens => {
            commands::screens::run_screens();
            Ok(())
        }
        Commands::Search { term } => {
            commands::search::run_search(open_store(data_dir)?, &term, api_url, quiet)
        }
        Commands::Follow { id } => commands::search::run_follow(open_store(data_dir)?, id),
        Commands::Shelf { sort, platform } => {
            commands::shelf::run_shelf(open_store(data_dir)?, sort, platform)
        }
        Commands::Show { id } => commands::shelf::run_show(open_store(data_dir)?, id),
        Commands::Mark {
            id,
            completed,
            platinum,
            platforms,
        } => commands::shelf::run_mark(open_store(data_dir)?, id, completed, platinum, &platforms),
        Commands::Unfollow { id, yes } => {
            commands::shelf::run_unfollow(open_store(data_dir)?, id, yes)
        }
        Commands::Stats => commands::shelf::run_stats(open_store(data_dir)?),
        Commands::Tier { action } => {
            let store = open_store(data_dir)?;
            match action {
                TierAction::Show => commands::tiers::run_tier_show(store),
                TierAction::Move { id, from, to } => {
                    commands::tiers::run_tier_move(store, id, from, to)
                }
                TierAction::Reset { yes } => commands::tiers::run_tier_reset(store, yes),
            }
        }
    }
}

/// Open the file store in the resolved data directory.
fn open_store(data_dir: Option<PathBuf>) -> Result<Arc<dyn KeyValueStore>, CliError> {
    let (dir, source) = game_shelf_lib::settings::resolve_data_dir(data_dir);
    log::debug!("Using data directory {} ({})", dir.display(), source);
    Ok(Arc::new(JsonFileStore::open(dir)?))
}

/// User-facing output goes through `log::info!`; warnings and errors get a
/// level prefix. `RUST_LOG` overrides the default level.
fn init_logger(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        })
        .init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
