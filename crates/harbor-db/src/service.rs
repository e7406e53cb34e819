//! Service layer wrapping raw database access.
//!
//! `HarborService` wraps `HarborDb`. All repo and query methods are
//! implemented as `impl HarborService` blocks in `repos/` and `query/`.

use crate::HarborDb;
use crate::error::DatabaseError;

/// Entry point for all catalog reads and mutations.
pub struct HarborService {
    db: HarborDb,
}

impl HarborService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = HarborDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `HarborDb` (for testing).
    #[must_use]
    pub fn from_db(db: HarborDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &HarborDb {
        &self.db
    }
}
