//! Helpers shared across command handlers.

use serde::de::DeserializeOwned;

/// Compute effective limit with precedence: local arg -> global flag -> config fallback.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}

/// Parse a snake_case enum value using serde-deserialization.
///
/// # Errors
///
/// Returns an error naming the field and offending value.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}
