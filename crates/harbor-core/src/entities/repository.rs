use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VcsType;

use super::Commit;

const fn default_tracked() -> bool {
    true
}

/// Non-indexed repository settings stored as a JSON blob in the `details`
/// column. Anything here is invisible to SQL predicates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RepositoryDetails {
    /// Whether the repository is actively tracked. New repositories are
    /// tracked until explicitly untracked.
    #[serde(default = "default_tracked")]
    pub tracked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Upstream remote the repository is mirrored from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_uri: Option<String>,
}

impl Default for RepositoryDetails {
    fn default() -> Self {
        Self {
            tracked: default_tracked(),
            description: None,
            remote_uri: None,
        }
    }
}

/// A catalogued source repository.
///
/// `commit_count` and `most_recent_commit` are eager-load attachments: they
/// are `Some` only when the listing query was asked to load them, so callers
/// can tell "not requested" apart from "requested, empty".
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Repository {
    pub id: i64,
    /// Globally-unique external key, e.g. `"rpo-a3f8b2c1"`.
    pub uid: String,
    /// Optional short human-readable alias, unique across the catalog.
    pub callsign: Option<String>,
    pub name: String,
    pub vcs: VcsType,
    pub details: RepositoryDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Commit count from the summary table. `Some(0)` when counts were
    /// requested but the repository has no summary row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_count: Option<i64>,

    /// Most recent commit. Outer `Some` means the load was requested; inner
    /// `None` means the repository has no commits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_recent_commit: Option<Option<Commit>>,
}

impl Repository {
    /// Derived tracked status. Lives in the details blob, not an indexed
    /// column, so listing queries filter on it after the page is loaded.
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        self.details.tracked
    }
}
