use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A commit observed in a catalogued repository.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Commit {
    pub id: i64,
    pub repository_id: i64,
    pub commit_hash: String,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub committed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
