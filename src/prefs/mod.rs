//! Session preference persistence.
//!
//! The last-chosen repository, tab, and search text survive across sessions
//! in `settings.conf`, a plain key = value file with `#` comments. The file
//! is read once at startup and written back field-by-field whenever a
//! selection changes; absent keys fall back to documented defaults.

pub mod paths;
pub mod save;

use std::path::Path;

use crate::state::Tab;

/// Default result limit when the settings file names none.
pub const DEFAULT_RESULT_LIMIT: usize = 500;

/// Settings skeleton written when the file is first created, so every key
/// is discoverable with its documentation.
pub const SETTINGS_SKELETON: &str = "\
# aptshelf settings
# Selection keys are written back by the application when they change.

# Last selected repository id; empty browses all repositories.
repository =

# Last selected tab: available, installed, or upgradable.
tab = available

# Last free-text search (applied on the available tab only).
search =

# Maximum number of packages per query.
result_limit = 500

# Command used to query and refresh the catalog.
bridge_command = aptshelf-bridge
";

/// Loaded preferences with every fallback already applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefs {
    /// Last selected repository id.
    pub repository: Option<String>,
    /// Last selected tab.
    pub tab: Tab,
    /// Last free-text search.
    pub search: String,
    /// Result limit for catalog queries.
    pub result_limit: usize,
    /// Bridge command name or path.
    pub bridge_command: String,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            repository: None,
            tab: Tab::Available,
            search: String::new(),
            result_limit: DEFAULT_RESULT_LIMIT,
            bridge_command: crate::bridge::DEFAULT_BRIDGE_COMMAND.to_string(),
        }
    }
}

/// What: Check if a settings line should be skipped (empty or comment).
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse one `key = value` line into a normalized pair.
///
/// Inputs: `line` settings line.
///
/// Output: `Some((key, value))` with the key lowercased and `.`/`-`/space
/// folded to `_`; `None` when the line carries no `=`.
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    Some((key, value.trim().to_string()))
}

/// What: Load preferences from `settings.conf`.
///
/// Inputs: `config_dir` resolved configuration directory.
///
/// Output: Preferences with defaults applied for every missing or
/// unparseable key. A missing file is not an error.
pub fn load(config_dir: &Path) -> Prefs {
    let path = paths::settings_path(config_dir);
    let mut prefs = Prefs::default();
    let Ok(content) = std::fs::read_to_string(&path) else {
        tracing::debug!(path = %path.display(), "[Prefs] no settings file, using defaults");
        return prefs;
    };
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, value)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "repository" => {
                prefs.repository = if value.is_empty() { None } else { Some(value) };
            }
            "tab" => {
                if let Some(tab) = Tab::from_config_key(&value) {
                    prefs.tab = tab;
                } else if !value.is_empty() {
                    tracing::warn!(value = %value, "[Prefs] unrecognized tab, keeping default");
                }
            }
            "search" => prefs.search = value,
            "result_limit" => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => prefs.result_limit = limit,
                _ => {
                    tracing::warn!(value = %value, "[Prefs] invalid result_limit, keeping default");
                }
            },
            "bridge_command" => {
                if !value.is_empty() {
                    prefs.bridge_command = value;
                }
            }
            other => {
                tracing::debug!(key = other, "[Prefs] ignoring unknown settings key");
            }
        }
    }
    tracing::debug!(
        repository = ?prefs.repository,
        tab = prefs.tab.as_config_key(),
        search = %prefs.search,
        "[Prefs] settings loaded"
    );
    prefs
}
