use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_lib::ConfigSource;
use game_shelf_lib::settings;
use game_shelf_search::SearchConfig;

use crate::error::CliError;

fn print_field(name: &str, value: &str, source: &ConfigSource) {
    log::info!(
        "  {} {} {}",
        format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
        value,
        format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Show current settings and their sources.
pub(crate) fn run_config_show(
    data_dir: Option<PathBuf>,
    api_url: Option<String>,
) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "game-shelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let (dir, dir_source) = settings::resolve_data_dir(data_dir);
    print_field("data_dir", &dir.display().to_string(), &dir_source);

    let mut sources = game_shelf_search::config_sources();
    if api_url.is_some() {
        sources.base_url = ConfigSource::CliArg;
    }
    match SearchConfig::load().and_then(|c| c.with_base_url(api_url)) {
        Ok(config) => {
            print_field("base_url", &config.base_url, &sources.base_url);
            print_field(
                "timeout_secs",
                &config.timeout_secs.to_string(),
                &sources.timeout_secs,
            );
        }
        Err(e) => {
            log::info!(
                "  {} {}",
                "base_url:".if_supports_color(Stdout, |t| t.cyan()),
                e.to_string().if_supports_color(Stdout, |t| t.red()),
            );
        }
    }

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        log::info!("{}", "settings.toml".if_supports_color(Stdout, |t| t.bold()));
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

/// Save (or clear) the search backend base URL.
pub(crate) fn run_config_set_url(url: Option<String>) -> Result<(), CliError> {
    let path = game_shelf_search::save_base_url(url.as_deref())
        .map_err(|e| CliError::config(e.to_string()))?;
    match url {
        Some(url) => log::info!(
            "{} base_url set to {} in {}",
            "✔".if_supports_color(Stdout, |t| t.green()),
            url.if_supports_color(Stdout, |t| t.cyan()),
            path.display(),
        ),
        None => log::info!(
            "{} base_url cleared in {}",
            "✔".if_supports_color(Stdout, |t| t.green()),
            path.display(),
        ),
    }
    Ok(())
}

/// Save (or clear) the data directory.
pub(crate) fn run_config_set_data_dir(dir: Option<PathBuf>) -> Result<(), CliError> {
    let value = match &dir {
        Some(dir) => Some(dir.to_str().ok_or_else(|| {
            CliError::config(format!("Path is not valid UTF-8: {}", dir.display()))
        })?),
        None => None,
    };
    let path = settings::save_setting("storage", "data_dir", value)?;
    match value {
        Some(value) => log::info!(
            "{} data_dir set to {} in {}",
            "✔".if_supports_color(Stdout, |t| t.green()),
            value.if_supports_color(Stdout, |t| t.cyan()),
            path.display(),
        ),
        None => log::info!(
            "{} data_dir cleared in {}",
            "✔".if_supports_color(Stdout, |t| t.green()),
            path.display(),
        ),
    }
    Ok(())
}
