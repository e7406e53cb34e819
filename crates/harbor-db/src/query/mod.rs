//! Paginated listing queries.
//!
//! Query builders are consumed by value and immutable once execution starts,
//! so concurrent callers never share a mutable query object. Values are
//! always bound through numbered placeholders, never interpolated.

pub mod commit;
pub mod pager;
pub mod repository;

/// Append an `IN (...)` predicate for `column`, pushing each value onto
/// `params` and emitting matching `?N` placeholders. Returns `None` for an
/// empty value set (no constraint).
pub(crate) fn in_condition(
    column: &str,
    values: impl IntoIterator<Item = libsql::Value>,
    params: &mut Vec<libsql::Value>,
) -> Option<String> {
    let mut placeholders = Vec::new();
    for value in values {
        params.push(value);
        placeholders.push(format!("?{}", params.len()));
    }
    if placeholders.is_empty() {
        None
    } else {
        Some(format!("{column} IN ({})", placeholders.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::in_condition;

    #[test]
    fn empty_values_impose_no_constraint() {
        let mut params = Vec::new();
        let cond = in_condition("r.id", std::iter::empty(), &mut params);
        assert_eq!(cond, None);
        assert!(params.is_empty());
    }

    #[test]
    fn numbers_placeholders_after_existing_params() {
        let mut params = vec![libsql::Value::from("already-bound")];
        let cond = in_condition(
            "r.id",
            [libsql::Value::from(5_i64), libsql::Value::from(9_i64)],
            &mut params,
        );
        assert_eq!(cond.as_deref(), Some("r.id IN (?2, ?3)"));
        assert_eq!(params.len(), 3);
    }
}
