//! Repository catalog mutations: create, fetch, tracking toggle.

use chrono::Utc;

use harbor_core::entities::{Repository, RepositoryDetails};
use harbor_core::enums::VcsType;
use harbor_core::ids::PREFIX_REPOSITORY;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_details, parse_enum};
use crate::service::HarborService;

pub(crate) const SELECT_COLS: &str =
    "id, uid, callsign, name, vcs, details, created_at, updated_at";

pub(crate) fn row_to_repository(row: &libsql::Row) -> Result<Repository, DatabaseError> {
    Ok(Repository {
        id: row.get(0)?,
        uid: row.get(1)?,
        callsign: get_opt_string(row, 2)?,
        name: row.get(3)?,
        vcs: parse_enum(&row.get::<String>(4)?)?,
        details: parse_details(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
        commit_count: None,
        most_recent_commit: None,
    })
}

impl HarborService {
    /// Create a repository. The external `uid` is generated; `callsign` must
    /// be unique across the catalog when given.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails (including a duplicate
    /// callsign, which surfaces as the underlying constraint error).
    pub async fn create_repository(
        &self,
        name: &str,
        vcs: VcsType,
        callsign: Option<&str>,
    ) -> Result<Repository, DatabaseError> {
        let now = Utc::now();
        let uid = self.db().generate_uid(PREFIX_REPOSITORY).await?;
        let details = RepositoryDetails::default();
        let details_json =
            serde_json::to_string(&details).map_err(|e| DatabaseError::Other(e.into()))?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO repositories (uid, callsign, name, vcs, details, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING id",
                libsql::params![
                    uid.as_str(),
                    callsign,
                    name,
                    vcs.as_str(),
                    details_json.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let id: i64 = row.get(0)?;

        tracing::debug!(id, uid = uid.as_str(), name, "created repository");

        Ok(Repository {
            id,
            uid,
            callsign: callsign.map(String::from),
            name: name.to_string(),
            vcs,
            details,
            created_at: now,
            updated_at: now,
            commit_count: None,
            most_recent_commit: None,
        })
    }

    /// Fetch a repository by numeric id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such repository exists.
    pub async fn get_repository(&self, id: i64) -> Result<Repository, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM repositories WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_repository(&row)
    }

    /// Fetch a repository by callsign.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such repository exists.
    pub async fn get_repository_by_callsign(
        &self,
        callsign: &str,
    ) -> Result<Repository, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM repositories WHERE callsign = ?1"),
                [callsign],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_repository(&row)
    }

    /// Flip the tracked flag inside the details blob.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such repository exists, or
    /// `DatabaseError` if the UPDATE fails.
    pub async fn set_repository_tracked(
        &self,
        id: i64,
        tracked: bool,
    ) -> Result<Repository, DatabaseError> {
        let mut repository = self.get_repository(id).await?;
        repository.details.tracked = tracked;

        let now = Utc::now();
        let details_json = serde_json::to_string(&repository.details)
            .map_err(|e| DatabaseError::Other(e.into()))?;

        self.db()
            .conn()
            .execute(
                "UPDATE repositories SET details = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![details_json.as_str(), now.to_rfc3339(), id],
            )
            .await?;

        repository.updated_at = now;
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn create_repository_roundtrip() {
        let svc = test_service().await;

        let repository = svc
            .create_repository("kernel", VcsType::Git, Some("KRNL"))
            .await
            .unwrap();

        assert!(repository.uid.starts_with("rpo-"));
        assert_eq!(repository.name, "kernel");
        assert_eq!(repository.callsign.as_deref(), Some("KRNL"));
        assert!(repository.is_tracked());
        assert_eq!(repository.commit_count, None);
        assert_eq!(repository.most_recent_commit, None);

        let fetched = svc.get_repository(repository.id).await.unwrap();
        assert_eq!(fetched.uid, repository.uid);
        assert_eq!(fetched.vcs, VcsType::Git);
    }

    #[tokio::test]
    async fn get_repository_missing() {
        let svc = test_service().await;
        let result = svc.get_repository(999).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn get_repository_by_callsign() {
        let svc = test_service().await;
        let created = svc
            .create_repository("docs", VcsType::Mercurial, Some("DOCS"))
            .await
            .unwrap();

        let fetched = svc.get_repository_by_callsign("DOCS").await.unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_callsign_rejected() {
        let svc = test_service().await;
        svc.create_repository("one", VcsType::Git, Some("DUP"))
            .await
            .unwrap();
        let result = svc.create_repository("two", VcsType::Git, Some("DUP")).await;
        assert!(result.is_err(), "duplicate callsign should be rejected");
    }

    #[tokio::test]
    async fn set_tracked_toggles_and_persists() {
        let svc = test_service().await;
        let repository = svc
            .create_repository("attic", VcsType::Svn, None)
            .await
            .unwrap();
        assert!(repository.is_tracked());

        let untracked = svc
            .set_repository_tracked(repository.id, false)
            .await
            .unwrap();
        assert!(!untracked.is_tracked());

        let fetched = svc.get_repository(repository.id).await.unwrap();
        assert!(!fetched.is_tracked());

        let retracked = svc
            .set_repository_tracked(repository.id, true)
            .await
            .unwrap();
        assert!(retracked.is_tracked());
    }
}
