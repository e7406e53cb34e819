//! Keyset paging shared by the listing queries.
//!
//! Pages move from the highest sort key downward (newest first); the cursor
//! carries the sort-key value of the last fetched row, not an offset.

use serde::Serialize;

const DEFAULT_LIMIT: u32 = 100;

/// Reverse keyset pager: descending order on a numeric sort column, with an
/// optional exclusive upper-bound cursor.
#[derive(Debug, Clone)]
pub struct Pager {
    limit: u32,
    after: Option<i64>,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            after: None,
        }
    }
}

impl Pager {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self { limit, after: None }
    }

    /// Resume below the given cursor (exclusive).
    #[must_use]
    pub fn after(mut self, cursor: i64) -> Self {
        self.after = Some(cursor);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Cursor predicate fragment, bound as a parameter. Appended last to the
    /// WHERE conditions by convention. `None` when paging from the top.
    pub fn cursor_condition(
        &self,
        column: &str,
        params: &mut Vec<libsql::Value>,
    ) -> Option<String> {
        self.after.map(|cursor| {
            params.push(cursor.into());
            format!("{column} < ?{}", params.len())
        })
    }

    /// Reverse ordering on the sort column: newest/highest first.
    #[must_use]
    pub fn order_clause(column: &str) -> String {
        format!("ORDER BY {column} DESC")
    }

    /// LIMIT fragment with the page size bound as a parameter.
    pub fn limit_clause(&self, params: &mut Vec<libsql::Value>) -> String {
        params.push(i64::from(self.limit).into());
        format!("LIMIT ?{}", params.len())
    }

    /// Continuation cursor from a fetched page: the last row's sort key when
    /// the database page filled the limit, `None` when the data ran out.
    #[must_use]
    pub fn next_cursor(&self, fetched: usize, last_id: Option<i64>) -> Option<i64> {
        if u64::try_from(fetched).unwrap_or(u64::MAX) < u64::from(self.limit) {
            None
        } else {
            last_id
        }
    }
}

/// One page of listing results.
///
/// `items` may be shorter than the requested limit even when `next_cursor`
/// is `Some`: post-load filtering runs after the database LIMIT and can
/// remove rows. Callers that want everything keep requesting pages while
/// `next_cursor` is present; page length alone does not mean end of data.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<i64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_cursor_condition_from_the_top() {
        let mut params = Vec::new();
        assert_eq!(Pager::new(10).cursor_condition("r.id", &mut params), None);
        assert!(params.is_empty());
    }

    #[test]
    fn cursor_condition_binds_value() {
        let mut params = Vec::new();
        let cond = Pager::new(10).after(42).cursor_condition("r.id", &mut params);
        assert_eq!(cond.as_deref(), Some("r.id < ?1"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn limit_clause_binds_after_existing_params() {
        let mut params = vec![libsql::Value::from(1_i64)];
        let clause = Pager::new(25).limit_clause(&mut params);
        assert_eq!(clause, "LIMIT ?2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn order_is_descending() {
        assert_eq!(Pager::order_clause("r.id"), "ORDER BY r.id DESC");
    }

    #[test]
    fn next_cursor_only_when_page_filled() {
        let pager = Pager::new(2);
        assert_eq!(pager.next_cursor(2, Some(7)), Some(7));
        assert_eq!(pager.next_cursor(1, Some(7)), None);
        assert_eq!(pager.next_cursor(0, None), None);
    }
}
