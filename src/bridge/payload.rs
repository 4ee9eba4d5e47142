//! Wire payloads exchanged with the bridge command.

use crate::state::{CatalogSnapshot, Package};

/// Successful reply of `aptshelf-bridge list`.
#[derive(Debug, serde::Deserialize)]
pub struct ListReply {
    /// Matching packages, already limited by the bridge.
    #[serde(default)]
    pub packages: Vec<Package>,
    /// Total matching count before the limit was applied.
    pub total_count: usize,
    /// Human-readable echo of the filters the bridge applied.
    #[serde(default)]
    pub applied_filters: Vec<String>,
    /// Limit the bridge enforced.
    #[serde(default)]
    pub limit: usize,
    /// Whether the result set was cut off at `limit`.
    #[serde(default)]
    pub truncated: bool,
    /// Whether apt metadata lists have ever been downloaded. An absent
    /// flag must not trigger a refresh, hence the `true` default.
    #[serde(default = "default_lists_populated")]
    pub apt_lists_populated: bool,
}

/// Serde default for [`ListReply::apt_lists_populated`].
const fn default_lists_populated() -> bool {
    true
}

impl From<ListReply> for CatalogSnapshot {
    fn from(reply: ListReply) -> Self {
        Self {
            packages: reply.packages,
            total_count: reply.total_count,
            truncated: reply.truncated,
            applied_filters: reply.applied_filters,
            lists_populated: reply.apt_lists_populated,
        }
    }
}

/// Error object the bridge prints to stderr on failure.
#[derive(Debug, serde::Deserialize)]
pub struct WireError {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code.
    pub code: String,
    /// Optional extra context.
    #[serde(default)]
    pub details: Option<String>,
}

/// One streamed progress line of `aptshelf-bridge update`.
#[derive(Debug, serde::Deserialize)]
pub struct ProgressLine {
    /// Line discriminator; progress lines carry `"progress"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Completion estimate in percent.
    #[serde(default)]
    pub percentage: u8,
    /// Short status text.
    #[serde(default)]
    pub message: String,
}

/// Terminal line of `aptshelf-bridge update`.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateResult {
    /// Whether the refresh completed.
    pub success: bool,
    /// Final status text.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: A full list reply converts into a catalog snapshot
    ///
    /// - Input: JSON document with two packages and all envelope fields
    /// - Output: Snapshot mirrors packages, counts, and the populated flag
    fn list_reply_into_snapshot() {
        let raw = r#"{
            "packages": [
                {
                    "name": "nginx",
                    "version": "1.24.0-1",
                    "summary": "small, powerful, scalable web/proxy server",
                    "section": "httpd",
                    "installed": false,
                    "origin": "Debian",
                    "tags": ["role::program", "network::server"]
                },
                {
                    "name": "curl",
                    "version": "8.5.0-2",
                    "summary": "command line tool for transferring data",
                    "section": "web",
                    "installed": true,
                    "upgradable": true,
                    "installed_version": "8.4.0-1",
                    "candidate_version": "8.5.0-2"
                }
            ],
            "total_count": 240,
            "applied_filters": ["search=web"],
            "limit": 2,
            "truncated": true,
            "apt_lists_populated": true
        }"#;
        let reply: ListReply = serde_json::from_str(raw).expect("reply parses");
        let snapshot: CatalogSnapshot = reply.into();
        assert_eq!(snapshot.packages.len(), 2);
        assert_eq!(snapshot.packages[0].name, "nginx");
        assert_eq!(snapshot.packages[0].tags.len(), 2);
        assert_eq!(snapshot.packages[1].installed_version.as_deref(), Some("8.4.0-1"));
        assert_eq!(snapshot.total_count, 240);
        assert!(snapshot.truncated);
        assert!(snapshot.lists_populated);
    }

    #[test]
    /// What: The lists-populated flag defaults to true when absent
    ///
    /// - Input: Minimal reply without `apt_lists_populated`
    /// - Output: Snapshot reports populated lists
    fn lists_populated_defaults_true() {
        let reply: ListReply =
            serde_json::from_str(r#"{"total_count": 0}"#).expect("reply parses");
        let snapshot: CatalogSnapshot = reply.into();
        assert!(snapshot.lists_populated);
        assert!(snapshot.packages.is_empty());
    }

    #[test]
    /// What: Progress and terminal update lines decode from stream output
    ///
    /// - Input: One progress line and one final line as printed by the bridge
    /// - Output: Fields land in the expected places
    fn update_stream_lines_decode() {
        let p: ProgressLine = serde_json::from_str(
            r#"{"type": "progress", "percentage": 40, "message": "Updating: http://deb.debian.org"}"#,
        )
        .expect("progress parses");
        assert_eq!(p.kind, "progress");
        assert_eq!(p.percentage, 40);
        let r: UpdateResult = serde_json::from_str(
            r#"{"success": true, "message": "Successfully updated package lists"}"#,
        )
        .expect("result parses");
        assert!(r.success);
    }
}
