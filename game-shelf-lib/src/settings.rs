//! Shared application settings.
//!
//! Settings live in `~/.config/game-shelf/settings.toml`. Each value is
//! resolved through a priority chain (CLI flag, environment variable,
//! settings file, built-in default) and reports where it came from.

use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GAME_SHELF_DATA_DIR";

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed on the command line.
    CliArg,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    ConfigFile,
    /// Built-in default value.
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArg => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Canonical path to the settings file: `~/.config/game-shelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("game-shelf").join("settings.toml")
}

/// Default data directory: `~/.local/share/game-shelf` (platform equivalent).
pub fn default_data_dir() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("game-shelf")
}

/// Resolve the directory holding the persisted shelf:
///
/// 1. CLI override (if `Some`)
/// 2. `$GAME_SHELF_DATA_DIR`
/// 3. `storage.data_dir` in `settings.toml`
/// 4. [`default_data_dir`]
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> (PathBuf, ConfigSource) {
    pick_data_dir(
        cli_override,
        std::env::var(DATA_DIR_ENV).ok(),
        load_setting("storage", "data_dir"),
    )
}

fn pick_data_dir(
    cli_override: Option<PathBuf>,
    env_value: Option<String>,
    file_value: Option<String>,
) -> (PathBuf, ConfigSource) {
    if let Some(p) = cli_override {
        return (p, ConfigSource::CliArg);
    }
    if let Some(p) = env_value.filter(|v| !v.is_empty()) {
        return (PathBuf::from(p), ConfigSource::EnvVar(DATA_DIR_ENV));
    }
    if let Some(p) = file_value {
        return (PathBuf::from(p), ConfigSource::ConfigFile);
    }
    (default_data_dir(), ConfigSource::Default)
}

/// Read and parse `settings.toml`. A missing file is silent; a malformed
/// one is logged and treated as empty.
fn load_settings_doc() -> Option<toml::Value> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    parse_settings(&contents)
}

fn parse_settings(contents: &str) -> Option<toml::Value> {
    match contents.parse::<toml::Value>() {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!("Ignoring malformed settings file: {e}");
            None
        }
    }
}

/// Read `[table].key` from `settings.toml` as a non-empty string.
pub fn load_setting(table: &str, key: &str) -> Option<String> {
    string_setting(&load_settings_doc()?, table, key)
}

/// Read `[table].key` as an integer.
pub fn load_integer_setting(table: &str, key: &str) -> Option<i64> {
    integer_setting(&load_settings_doc()?, table, key)
}

fn string_setting(doc: &toml::Value, table: &str, key: &str) -> Option<String> {
    let value = doc.get(table)?.get(key)?.as_str()?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn integer_setting(doc: &toml::Value, table: &str, key: &str) -> Option<i64> {
    doc.get(table)?.get(key)?.as_integer()
}

/// Save (or clear) `[table].key` in `settings.toml`.
///
/// Uses `toml::Value` for a surgical update so other fields are preserved.
pub fn save_setting(table: &str, key: &str, value: Option<&str>) -> io::Result<PathBuf> {
    let settings = settings_path();
    let existing = std::fs::read_to_string(&settings).ok();
    let serialized = update_setting(existing.as_deref(), table, key, value)?;
    write_atomically(&settings, &serialized)?;
    Ok(settings)
}

fn update_setting(
    existing: Option<&str>,
    table: &str,
    key: &str,
    value: Option<&str>,
) -> io::Result<String> {
    let mut doc: toml::Value = existing
        .and_then(|contents| contents.parse().ok())
        .unwrap_or_else(|| toml::Value::Table(Default::default()));

    let root = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let section = root
        .entry(table)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section = section
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{table}] is not a table")))?;

    match value {
        Some(v) => {
            section.insert(key.to_string(), toml::Value::String(v.to_string()));
        }
        None => {
            section.remove(key);
        }
    }

    toml::to_string_pretty(&doc).map_err(io::Error::other)
}

fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    toml::to_string_pretty(&load_settings_doc()?).ok()
}
