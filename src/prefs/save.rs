//! Write-on-change persistence for selection preferences.

use std::fs;
use std::path::Path;

use crate::prefs::{SETTINGS_SKELETON, paths, skip_comment_or_empty};
use crate::state::Tab;

/// What: Replace one key in `settings.conf`, preserving comments and other
/// keys, seeding the documented skeleton when the file is new or empty.
///
/// Inputs:
/// - `config_dir`: Resolved configuration directory.
/// - `key`: Normalized settings key to replace or append.
/// - `value`: New value, may be empty.
fn upsert_key(config_dir: &Path, key: &str, value: &str) {
    let path = paths::settings_path(config_dir);
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let existing = fs::read_to_string(&path).ok().filter(|c| !c.trim().is_empty());
    let mut lines: Vec<String> = existing
        .as_deref()
        .unwrap_or(SETTINGS_SKELETON)
        .lines()
        .map(ToString::to_string)
        .collect();

    let mut replaced = false;
    for line in &mut lines {
        if skip_comment_or_empty(line) {
            continue;
        }
        if let Some((found, _)) = crate::prefs::parse_key_value(line)
            && found == key
        {
            *line = format!("{key} = {value}");
            replaced = true;
        }
    }
    if !replaced {
        lines.push(format!("{key} = {value}"));
    }

    let body = lines.join("\n") + "\n";
    match fs::write(&path, body) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), key, "[Prefs] settings key persisted");
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), key, error = %e, "[Prefs] failed to persist settings key");
        }
    }
}

/// Persist the last selected repository; `None` clears the narrowing.
pub fn save_repository(config_dir: &Path, repository: Option<&str>) {
    upsert_key(config_dir, "repository", repository.unwrap_or(""));
}

/// Persist the last selected tab.
pub fn save_tab(config_dir: &Path, tab: Tab) {
    upsert_key(config_dir, "tab", tab.as_config_key());
}

/// Persist the last free-text search.
pub fn save_search(config_dir: &Path, search: &str) {
    upsert_key(config_dir, "search", search);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs;

    #[test]
    /// What: First save seeds the skeleton and records the value
    ///
    /// - Input: Empty configuration directory, one tab save
    /// - Output: File exists with skeleton comments and the new tab value
    fn first_save_seeds_skeleton() {
        let dir = tempfile::tempdir().expect("tempdir");
        save_tab(dir.path(), Tab::Installed);
        let body = std::fs::read_to_string(paths::settings_path(dir.path()))
            .expect("settings written");
        assert!(body.contains("# aptshelf settings"));
        assert!(body.contains("tab = installed"));
        assert_eq!(prefs::load(dir.path()).tab, Tab::Installed);
    }

    #[test]
    /// What: Saves preserve unrelated keys and comments
    ///
    /// - Input: Hand-written settings file, then repository and search saves
    /// - Output: Custom comment and bridge_command survive, both keys updated
    fn saves_preserve_other_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            paths::settings_path(dir.path()),
            "# my notes\nbridge_command = /opt/bridge\nrepository = old\n",
        )
        .expect("write settings");
        save_repository(dir.path(), Some("hatlabs"));
        save_search(dir.path(), "sonar");
        let body = std::fs::read_to_string(paths::settings_path(dir.path()))
            .expect("settings readable");
        assert!(body.contains("# my notes"));
        assert!(body.contains("bridge_command = /opt/bridge"));
        assert!(body.contains("repository = hatlabs"));
        assert!(body.contains("search = sonar"));
        assert!(!body.contains("repository = old"));
        let loaded = prefs::load(dir.path());
        assert_eq!(loaded.repository.as_deref(), Some("hatlabs"));
        assert_eq!(loaded.search, "sonar");
        assert_eq!(loaded.bridge_command, "/opt/bridge");
    }

    #[test]
    /// What: Clearing the repository writes an empty value, not a removal
    ///
    /// - Input: Saved repository, then a clear
    /// - Output: Key present with empty value; load yields None
    fn clearing_repository() {
        let dir = tempfile::tempdir().expect("tempdir");
        save_repository(dir.path(), Some("main"));
        save_repository(dir.path(), None);
        let body = std::fs::read_to_string(paths::settings_path(dir.path()))
            .expect("settings readable");
        assert!(body.contains("repository = \n") || body.contains("repository ="));
        assert_eq!(prefs::load(dir.path()).repository, None);
    }
}
