//! Paginated, filterable repository listing with batched eager loading.
//!
//! One primary SELECT per page. Aggregates come from a LEFT JOIN against the
//! summary table, joined only when asked for. The most-recent-commit load is
//! a two-phase pipeline (a pure id-collect pass over the fetched rows, then
//! a single batched lookup), so a page never costs one commit query per row.

use std::collections::{HashMap, HashSet};

use harbor_core::entities::Repository;
use harbor_core::enums::StatusSelector;

use crate::error::DatabaseError;
use crate::helpers::get_opt_i64;
use crate::query::commit::fetch_by_ids;
use crate::query::in_condition;
use crate::query::pager::{Page, Pager};
use crate::repos::repository::row_to_repository;
use crate::service::HarborService;

const REPO_COLS: &str =
    "r.id, r.uid, r.callsign, r.name, r.vcs, r.details, r.created_at, r.updated_at";

/// Row shape from the primary query: entity columns plus the joined summary
/// columns when eager data was requested.
struct RepositoryRow {
    repository: Repository,
    size: Option<i64>,
    last_commit_id: Option<i64>,
}

/// Repository listing query.
///
/// Filters are conjunctive across fields and IN-list within a field; empty
/// collections impose no constraint. The status selector is held raw and
/// parsed only when the loaded page is filtered (see [`DatabaseError::InvalidFilter`]).
#[derive(Debug, Clone)]
pub struct RepositoryQuery {
    ids: Vec<i64>,
    uids: Vec<String>,
    callsigns: Vec<String>,
    status: String,
    need_commit_counts: bool,
    need_most_recent_commits: bool,
    pager: Pager,
}

impl Default for RepositoryQuery {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            uids: Vec::new(),
            callsigns: Vec::new(),
            status: StatusSelector::All.as_str().to_string(),
            need_commit_counts: false,
            need_most_recent_commits: false,
            pager: Pager::default(),
        }
    }
}

impl RepositoryQuery {
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
    pub fn with_uids(mut self, uids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.uids.extend(uids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_callsigns(
        mut self,
        callsigns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.callsigns.extend(callsigns.into_iter().map(Into::into));
        self
    }

    /// Tracked-status selector: `"open"`, `"closed"`, or `"all"` (default).
    /// Not validated here; an unknown value fails `load_page`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn need_commit_counts(mut self, need: bool) -> Self {
        self.need_commit_counts = need;
        self
    }

    #[must_use]
    pub fn need_most_recent_commits(mut self, need: bool) -> Self {
        self.need_most_recent_commits = need;
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

    const fn join_summary(&self) -> bool {
        self.need_commit_counts || self.need_most_recent_commits
    }

    fn build_sql(&self) -> (String, Vec<libsql::Value>) {
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut conditions: Vec<String> = Vec::new();

        // Filter predicates are always scoped to the entity's own columns,
        // never the joined summary table.
        if let Some(cond) = in_condition(
            "r.id",
            self.ids.iter().map(|id| libsql::Value::from(*id)),
            &mut params,
        ) {
            conditions.push(cond);
        }
        if let Some(cond) = in_condition(
            "r.uid",
            self.uids.iter().map(|uid| libsql::Value::from(uid.as_str())),
            &mut params,
        ) {
            conditions.push(cond);
        }
        if let Some(cond) = in_condition(
            "r.callsign",
            self.callsigns
                .iter()
                .map(|callsign| libsql::Value::from(callsign.as_str())),
            &mut params,
        ) {
            conditions.push(cond);
        }
        if let Some(cond) = self.pager.cursor_condition("r.id", &mut params) {
            conditions.push(cond);
        }

        let select = if self.join_summary() {
            format!(
                "SELECT {REPO_COLS}, s.size, s.last_commit_id FROM repositories r \
                 LEFT JOIN repository_summary s ON s.repository_id = r.id"
            )
        } else {
            format!("SELECT {REPO_COLS} FROM repositories r")
        };
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let order = Pager::order_clause("r.id");
        let limit = self.pager.limit_clause(&mut params);

        (format!("{select}{where_clause} {order} {limit}"), params)
    }

    /// Load one page, newest first, with any requested eager data attached
    /// and the status filter applied.
    ///
    /// The page can come back shorter than the limit while `next_cursor` is
    /// still `Some`: the status filter runs after the database LIMIT. There
    /// is no automatic backfill; callers keep paging on `next_cursor`.
    ///
    /// # Errors
    ///
    /// `DatabaseError::InvalidFilter` for an unknown status selector; any
    /// storage error from the primary or batched commit query is propagated
    /// unchanged, failing the whole page.
    pub async fn load_page(&self, svc: &HarborService) -> Result<Page<Repository>, DatabaseError> {
        let (sql, params) = self.build_sql();
        tracing::debug!(sql = sql.as_str(), "loading repository page");

        let mut rows = svc
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let join_summary = self.join_summary();
        let mut loaded: Vec<RepositoryRow> = Vec::new();
        while let Some(row) = rows.next().await? {
            let repository = row_to_repository(&row)?;
            let (size, last_commit_id) = if join_summary {
                (get_opt_i64(&row, 8)?, get_opt_i64(&row, 9)?)
            } else {
                (None, None)
            };
            loaded.push(RepositoryRow {
                repository,
                size,
                last_commit_id,
            });
        }

        // Cursor comes from the raw database page, before the status filter,
        // so paging always advances past filtered-out rows.
        let next_cursor = self
            .pager
            .next_cursor(loaded.len(), loaded.last().map(|row| row.repository.id));

        if self.need_commit_counts {
            for row in &mut loaded {
                row.repository.commit_count = Some(row.size.unwrap_or(0));
            }
        }

        if self.need_most_recent_commits {
            let commit_ids = collect_last_commit_ids(&loaded);
            let commits = if commit_ids.is_empty() {
                HashMap::new()
            } else {
                fetch_by_ids(svc, &commit_ids).await?
            };
            for row in &mut loaded {
                row.repository.most_recent_commit = Some(
                    row.last_commit_id
                        .and_then(|id| commits.get(&id).cloned()),
                );
            }
        }

        let repositories = loaded.into_iter().map(|row| row.repository).collect();
        let items = filter_by_status(repositories, &self.status)?;
        Ok(Page { items, next_cursor })
    }
}

/// Pure collect phase for the batched commit lookup: distinct non-null
/// last-commit ids in row order. An empty result means the batched query is
/// skipped entirely.
fn collect_last_commit_ids(rows: &[RepositoryRow]) -> Vec<i64> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter_map(|row| row.last_commit_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Post-load status filter over a loaded page.
///
/// Tracked status lives in the details blob, not an indexed column, so it
/// cannot be pushed into the WHERE clause yet.
fn filter_by_status(
    repositories: Vec<Repository>,
    selector: &str,
) -> Result<Vec<Repository>, DatabaseError> {
    let status = StatusSelector::from_selector(selector).ok_or_else(|| {
        DatabaseError::InvalidFilter(format!("unknown status selector '{selector}'"))
    })?;

    Ok(match status {
        StatusSelector::Open => repositories
            .into_iter()
            .filter(Repository::is_tracked)
            .collect(),
        StatusSelector::Closed => repositories
            .into_iter()
            .filter(|repository| !repository.is_tracked())
            .collect(),
        StatusSelector::All => repositories,
    })
}
