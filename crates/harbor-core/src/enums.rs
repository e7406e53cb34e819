//! Version-control types and listing status selectors.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// VcsType
// ---------------------------------------------------------------------------

/// Version-control system backing a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VcsType {
    Git,
    Mercurial,
    Svn,
}

impl VcsType {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Mercurial => "mercurial",
            Self::Svn => "svn",
        }
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StatusSelector
// ---------------------------------------------------------------------------

/// Tracked-status selector for repository listing queries.
///
/// The selector arrives from callers as a raw string and is only parsed when
/// the loaded page is filtered, so an unknown value fails the query rather
/// than the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusSelector {
    /// Only actively tracked repositories.
    Open,
    /// Only untracked repositories.
    Closed,
    /// No tracked-status constraint.
    All,
}

impl StatusSelector {
    /// Parse a raw selector string. Returns `None` for unknown values; the
    /// caller owns the error shape.
    #[must_use]
    pub fn from_selector(raw: &str) -> Option<Self> {
        match raw {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for StatusSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vcs_type_round_trips_through_serde() {
        for vcs in [VcsType::Git, VcsType::Mercurial, VcsType::Svn] {
            let json = serde_json::to_string(&vcs).unwrap();
            assert_eq!(json, format!("\"{}\"", vcs.as_str()));
            let back: VcsType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, vcs);
        }
    }

    #[test]
    fn status_selector_parses_known_values() {
        assert_eq!(StatusSelector::from_selector("open"), Some(StatusSelector::Open));
        assert_eq!(StatusSelector::from_selector("closed"), Some(StatusSelector::Closed));
        assert_eq!(StatusSelector::from_selector("all"), Some(StatusSelector::All));
    }

    #[test]
    fn status_selector_rejects_unknown_values() {
        assert_eq!(StatusSelector::from_selector("archived"), None);
        assert_eq!(StatusSelector::from_selector(""), None);
        assert_eq!(StatusSelector::from_selector("OPEN"), None);
    }
}
