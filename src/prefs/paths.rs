//! Configuration path resolution.

use std::env;
use std::path::{Path, PathBuf};

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Default configuration directory: `$XDG_CONFIG_HOME/aptshelf` or
/// `$HOME/.config/aptshelf`.
pub fn default_config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("aptshelf")
}

/// Location of the settings file inside a configuration directory.
pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.conf")
}

/// Location of the store definitions inside a configuration directory.
pub fn stores_path(config_dir: &Path) -> PathBuf {
    config_dir.join("stores.toml")
}

/// Log directory inside a configuration directory, created on demand.
pub fn logs_dir(config_dir: &Path) -> PathBuf {
    let dir = config_dir.join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
