//! Commit recording plus summary maintenance.
//!
//! Each recorded commit upserts the repository's summary row so listing
//! queries can join aggregates instead of counting on demand.

use chrono::{DateTime, Utc};

use harbor_core::entities::Commit;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::HarborService;

pub(crate) const SELECT_COLS: &str =
    "id, repository_id, commit_hash, summary, author, committed_at, created_at";

pub(crate) fn row_to_commit(row: &libsql::Row) -> Result<Commit, DatabaseError> {
    Ok(Commit {
        id: row.get(0)?,
        repository_id: row.get(1)?,
        commit_hash: row.get(2)?,
        summary: get_opt_string(row, 3)?,
        author: get_opt_string(row, 4)?,
        committed_at: parse_datetime(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl HarborService {
    /// Record a commit and bump the repository's summary row
    /// (`size` and `last_commit_id`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either statement fails (unknown
    /// repository surfaces as the foreign-key constraint error).
    pub async fn record_commit(
        &self,
        repository_id: i64,
        commit_hash: &str,
        summary: Option<&str>,
        author: Option<&str>,
        committed_at: DateTime<Utc>,
    ) -> Result<Commit, DatabaseError> {
        let now = Utc::now();

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO commits (repository_id, commit_hash, summary, author, committed_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id",
                libsql::params![
                    repository_id,
                    commit_hash,
                    summary,
                    author,
                    committed_at.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let id: i64 = row.get(0)?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO repository_summary (repository_id, size, last_commit_id)
                 VALUES (?1, 1, ?2)
                 ON CONFLICT(repository_id)
                 DO UPDATE SET size = size + 1, last_commit_id = excluded.last_commit_id",
                libsql::params![repository_id, id],
            )
            .await?;

        tracing::debug!(repository_id, commit_hash, id, "recorded commit");

        Ok(Commit {
            id,
            repository_id,
            commit_hash: commit_hash.to_string(),
            summary: summary.map(String::from),
            author: author.map(String::from),
            committed_at,
            created_at: now,
        })
    }
}
