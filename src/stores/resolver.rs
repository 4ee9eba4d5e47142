//! Store membership evaluation.
//!
//! Pure functions of (store rule, package attributes); no state, no I/O.

use crate::state::Package;
use crate::stores::Store;

/// What: Decide whether a package belongs to a store.
///
/// Inputs:
/// - `store`: Store whose rule is evaluated.
/// - `package`: Package attributes (origin, section, tags, name).
///
/// Output:
/// - True when ANY populated criterion matches. A rule with no populated
///   criteria matches nothing.
#[must_use]
pub fn matches_store(store: &Store, package: &Package) -> bool {
    let rule = &store.rule;
    matches_origin(&rule.include_origins, package)
        || matches_section(&rule.include_sections, package)
        || matches_tags(&rule.include_tags, package)
        || matches_packages(&rule.include_packages, package)
}

/// Origin criterion: package origin equals one of the configured origins.
fn matches_origin(origins: &[String], package: &Package) -> bool {
    if origins.is_empty() {
        return false;
    }
    package
        .origin
        .as_deref()
        .is_some_and(|origin| origins.iter().any(|o| o == origin))
}

/// Section criterion: package section is one of the configured sections.
fn matches_section(sections: &[String], package: &Package) -> bool {
    if sections.is_empty() || package.section.is_empty() {
        return false;
    }
    sections.iter().any(|s| s == &package.section)
}

/// Tag criterion: package tag set intersects the configured tag set.
fn matches_tags(tags: &[String], package: &Package) -> bool {
    if tags.is_empty() || package.tags.is_empty() {
        return false;
    }
    tags.iter().any(|t| package.tags.iter().any(|p| p == t))
}

/// Explicit-name criterion: package name is listed verbatim.
fn matches_packages(names: &[String], package: &Package) -> bool {
    !names.is_empty() && names.iter().any(|n| n == &package.name)
}

/// What: Narrow a package list to one store's members.
///
/// Inputs:
/// - `packages`: Packages from an accepted snapshot.
/// - `store`: Store to narrow by.
///
/// Output:
/// - Members in input order.
#[must_use]
pub fn filter_packages(packages: &[Package], store: &Store) -> Vec<Package> {
    packages
        .iter()
        .filter(|p| matches_store(store, p))
        .cloned()
        .collect()
}
