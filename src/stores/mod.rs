//! Curated store definitions.
//!
//! A store is a named, rule-defined subset of the catalog. Definitions are
//! loaded once at startup from `stores.toml` in the configuration directory
//! and are immutable for the rest of the session.

pub mod resolver;

use std::path::Path;

/// Inclusion rule of one store.
///
/// Criteria are OR-combined: a package belongs to the store when any
/// populated criterion matches. An empty list contributes no matches, it
/// never means "match everything".
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct StoreRule {
    /// Accepted repository origins.
    #[serde(default)]
    pub include_origins: Vec<String>,
    /// Accepted archive sections.
    #[serde(default)]
    pub include_sections: Vec<String>,
    /// Accepted package tags; one shared tag suffices.
    #[serde(default)]
    pub include_tags: Vec<String>,
    /// Explicitly included package names.
    #[serde(default)]
    pub include_packages: Vec<String>,
}

impl StoreRule {
    /// True when no criterion is populated. Such a rule matches nothing
    /// and is rejected at load time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include_origins.is_empty()
            && self.include_sections.is_empty()
            && self.include_tags.is_empty()
            && self.include_packages.is_empty()
    }
}

/// One configured store.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Store {
    /// Stable identifier used for selection and persistence.
    #[serde(default)]
    pub id: String,
    /// Display name; falls back to the id when empty.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Inclusion rule.
    #[serde(default, alias = "filters")]
    pub rule: StoreRule,
}

impl Store {
    /// Display name with id fallback.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

/// Top-level shape of `stores.toml`: a list of `[[store]]` tables.
#[derive(Debug, Default, serde::Deserialize)]
struct StoresFile {
    #[serde(default)]
    store: Vec<Store>,
}

/// What: Load and validate store definitions.
///
/// Inputs:
/// - `path`: Location of `stores.toml`; a missing file yields no stores.
///
/// Output:
/// - Valid stores in file order, plus one diagnostic string per rejected
///   definition or file-level problem.
///
/// Details:
/// - A store without an id, with no populated criterion, or with a
///   duplicate id is excluded from the session and surfaced, never
///   silently widened or narrowed.
pub fn load_stores(path: &Path) -> (Vec<Store>, Vec<String>) {
    let mut diagnostics = Vec::new();
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "[Stores] no store configuration present");
        return (Vec::new(), diagnostics);
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            diagnostics.push(format!("store configuration unreadable: {e}"));
            return (Vec::new(), diagnostics);
        }
    };
    let parsed: StoresFile = match toml::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            diagnostics.push(format!("store configuration is not valid TOML: {e}"));
            return (Vec::new(), diagnostics);
        }
    };
    let mut stores: Vec<Store> = Vec::with_capacity(parsed.store.len());
    for (index, store) in parsed.store.into_iter().enumerate() {
        if store.id.trim().is_empty() {
            diagnostics.push(format!("store #{} has no id and was ignored", index + 1));
            continue;
        }
        if store.rule.is_empty() {
            diagnostics.push(format!(
                "store '{}' defines no inclusion criteria and was ignored",
                store.id
            ));
            continue;
        }
        if stores.iter().any(|s: &Store| s.id == store.id) {
            diagnostics.push(format!("store '{}' is defined twice; keeping the first", store.id));
            continue;
        }
        stores.push(store);
    }
    tracing::info!(
        path = %path.display(),
        stores = stores.len(),
        rejected = diagnostics.len(),
        "[Stores] store configuration loaded"
    );
    (stores, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_stores(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stores.toml");
        std::fs::write(&path, content).expect("write stores.toml");
        (dir, path)
    }

    #[test]
    /// What: A well-formed stores file loads every definition in order
    ///
    /// - Input: Two `[[store]]` tables with mixed criteria
    /// - Output: Both stores present, no diagnostics
    fn load_valid_stores() {
        let (_dir, path) = write_stores(
            r#"
            [[store]]
            id = "marine"
            name = "Marine"
            description = "Packages for the boat"

            [store.rule]
            include_sections = ["net", "web"]
            include_tags = ["field::marine"]

            [[store]]
            id = "hatlabs"

            [store.rule]
            include_origins = ["Hat Labs"]
            "#,
        );
        let (stores, diagnostics) = load_stores(&path);
        assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
        assert_eq!(stores.len(), 2);
        assert_eq!(stores[0].id, "marine");
        assert_eq!(stores[0].display_name(), "Marine");
        assert_eq!(stores[1].display_name(), "hatlabs");
        assert_eq!(stores[1].rule.include_origins, vec!["Hat Labs".to_string()]);
    }

    #[test]
    /// What: A store with zero populated criteria is rejected loudly
    ///
    /// - Input: One store with an empty rule table
    /// - Output: No stores, one diagnostic naming the store
    fn empty_rule_is_surfaced() {
        let (_dir, path) = write_stores(
            r#"
            [[store]]
            id = "everything"
            name = "Everything"
            "#,
        );
        let (stores, diagnostics) = load_stores(&path);
        assert!(stores.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("everything"));
    }

    #[test]
    /// What: Missing ids and duplicate ids each produce a diagnostic
    ///
    /// - Input: A store without id and two stores sharing one id
    /// - Output: One surviving store, two diagnostics
    fn missing_and_duplicate_ids() {
        let (_dir, path) = write_stores(
            r#"
            [[store]]
            name = "nameless"
            [store.rule]
            include_sections = ["net"]

            [[store]]
            id = "dup"
            [store.rule]
            include_sections = ["net"]

            [[store]]
            id = "dup"
            [store.rule]
            include_sections = ["web"]
            "#,
        );
        let (stores, diagnostics) = load_stores(&path);
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].rule.include_sections, vec!["net".to_string()]);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    /// What: A missing file is not an error
    ///
    /// - Input: Path that does not exist
    /// - Output: Empty store list, no diagnostics
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (stores, diagnostics) = load_stores(&dir.path().join("stores.toml"));
        assert!(stores.is_empty());
        assert!(diagnostics.is_empty());
    }
}
