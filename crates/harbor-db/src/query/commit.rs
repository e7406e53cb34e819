//! Commit listing and batched lookup.
//!
//! `fetch_by_ids` is the secondary service behind the repository listing's
//! eager most-recent-commit load: one SELECT for a whole page of ids.

use std::collections::HashMap;

use harbor_core::entities::Commit;

use crate::error::DatabaseError;
use crate::query::in_condition;
use crate::query::pager::{Page, Pager};
use crate::repos::commit::{SELECT_COLS, row_to_commit};
use crate::service::HarborService;

/// Filterable, cursor-paged commit listing.
#[derive(Debug, Clone, Default)]
pub struct CommitQuery {
    ids: Vec<i64>,
    repository_ids: Vec<i64>,
    pager: Pager,
}

impl CommitQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.ids.extend(ids);
        self
    }

    #[must_use]
    pub fn with_repository_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.repository_ids.extend(ids);
        self
    }

    #[must_use]
    pub fn after(mut self, cursor: i64) -> Self {
        self.pager = self.pager.after(cursor);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.pager = self.pager.with_limit(limit);
        self
    }

    /// Load one page, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_page(&self, svc: &HarborService) -> Result<Page<Commit>, DatabaseError> {
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut conditions: Vec<String> = Vec::new();

        if let Some(cond) = in_condition(
            "id",
            self.ids.iter().map(|id| libsql::Value::from(*id)),
            &mut params,
        ) {
            conditions.push(cond);
        }
        if let Some(cond) = in_condition(
            "repository_id",
            self.repository_ids.iter().map(|id| libsql::Value::from(*id)),
            &mut params,
        ) {
            conditions.push(cond);
        }
        if let Some(cond) = self.pager.cursor_condition("id", &mut params) {
            conditions.push(cond);
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let order = Pager::order_clause("id");
        let limit = self.pager.limit_clause(&mut params);
        let sql = format!("SELECT {SELECT_COLS} FROM commits{where_clause} {order} {limit}");

        let mut rows = svc
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut commits = Vec::new();
        while let Some(row) = rows.next().await? {
            commits.push(row_to_commit(&row)?);
        }

        let next_cursor = self
            .pager
            .next_cursor(commits.len(), commits.last().map(|c| c.id));
        Ok(Page {
            items: commits,
            next_cursor,
        })
    }
}

/// Batched commit lookup: one SELECT for all ids, mapped by id.
///
/// Ids the database does not know simply have no entry in the result.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn fetch_by_ids(
    svc: &HarborService,
    ids: &[i64],
) -> Result<HashMap<i64, Commit>, DatabaseError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut params: Vec<libsql::Value> = Vec::new();
    let condition = in_condition(
        "id",
        ids.iter().map(|id| libsql::Value::from(*id)),
        &mut params,
    )
    .ok_or_else(|| DatabaseError::InvalidState("empty id set after guard".into()))?;

    let sql = format!("SELECT {SELECT_COLS} FROM commits WHERE {condition}");
    let mut rows = svc
        .db()
        .conn()
        .query(&sql, libsql::params_from_iter(params))
        .await?;

    let mut commits = HashMap::with_capacity(ids.len());
    while let Some(row) = rows.next().await? {
        let commit = row_to_commit(&row)?;
        commits.insert(commit.id, commit);
    }
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use harbor_core::enums::VcsType;

    use super::*;
    use crate::test_support::helpers::{seed_commits, test_service};

    #[tokio::test]
    async fn fetch_by_ids_empty_input() {
        let svc = test_service().await;
        let map = fetch_by_ids(&svc, &[]).await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn fetch_by_ids_maps_known_ids() {
        let svc = test_service().await;
        let repository = svc
            .create_repository("kernel", VcsType::Git, None)
            .await
            .unwrap();
        let commits = seed_commits(&svc, repository.id, 3).await;

        let wanted = [commits[0].id, commits[2].id];
        let map = fetch_by_ids(&svc, &wanted).await.unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map[&commits[0].id].commit_hash, commits[0].commit_hash);
        assert_eq!(map[&commits[2].id].commit_hash, commits[2].commit_hash);
        assert!(!map.contains_key(&commits[1].id));
    }

    #[tokio::test]
    async fn fetch_by_ids_skips_unknown_ids() {
        let svc = test_service().await;
        let repository = svc
            .create_repository("kernel", VcsType::Git, None)
            .await
            .unwrap();
        let commits = seed_commits(&svc, repository.id, 1).await;

        let map = fetch_by_ids(&svc, &[commits[0].id, 9999]).await.unwrap();
        assert_eq!(map.len(), 1);
    }

    #[tokio::test]
    async fn load_page_filters_by_repository_newest_first() {
        let svc = test_service().await;
        let kernel = svc
            .create_repository("kernel", VcsType::Git, None)
            .await
            .unwrap();
        let docs = svc
            .create_repository("docs", VcsType::Git, None)
            .await
            .unwrap();
        seed_commits(&svc, kernel.id, 3).await;
        seed_commits(&svc, docs.id, 2).await;

        let page = CommitQuery::new()
            .with_repository_ids([kernel.id])
            .load_page(&svc)
            .await
            .unwrap();

        assert_eq!(page.items.len(), 3);
        assert!(page.items.iter().all(|c| c.repository_id == kernel.id));
        assert!(page.items.windows(2).all(|w| w[0].id > w[1].id));
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn load_page_cursor_pages_through_history() {
        let svc = test_service().await;
        let repository = svc
            .create_repository("kernel", VcsType::Git, None)
            .await
            .unwrap();
        for n in 0..5 {
            svc.record_commit(repository.id, &format!("hash-{n}"), None, None, Utc::now())
                .await
                .unwrap();
        }

        let first = CommitQuery::new().limit(2).load_page(&svc).await.unwrap();
        assert_eq!(first.items.len(), 2);
        let cursor = first.next_cursor.unwrap();

        let second = CommitQuery::new()
            .limit(2)
            .after(cursor)
            .load_page(&svc)
            .await
            .unwrap();
        assert_eq!(second.items.len(), 2);
        assert!(second.items.iter().all(|c| c.id < cursor));
    }
}
