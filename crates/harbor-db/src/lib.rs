//! # harbor-db
//!
//! libSQL storage for the Harbor repository catalog.
//!
//! Handles all relational state: repositories, recorded commits, and the
//! per-repository summary aggregates, plus the paginated listing queries
//! over them. Uses the `libsql` crate (C `SQLite` fork) for an embedded,
//! parameterized SQL engine.
//!
//! Listing results are not access-filtered here; callers compose their own
//! policy layer on top of the returned pages.

pub mod error;
pub mod helpers;
mod migrations;
pub mod query;
pub mod repos;
pub mod service;

mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Harbor state operations.
///
/// Wraps a libSQL database and connection. Provides external-key generation;
/// repo and query methods live on [`service::HarborService`].
pub struct HarborDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl HarborDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Must be per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let harbor_db = Self { db, conn };
        harbor_db.run_migrations().await?;
        tracing::debug!(path, "opened harbor database");
        Ok(harbor_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed external key via libSQL, e.g. `"rpo-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_uid(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
