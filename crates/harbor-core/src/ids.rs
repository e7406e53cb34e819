//! ID prefix constants for externally-visible entity keys.
//!
//! Numeric row ids are internal; the `uid` column carries a prefixed random
//! key, e.g. `"rpo-a3f8b2c1"`, generated by the database layer.

pub const PREFIX_REPOSITORY: &str = "rpo";

/// Every known prefix, for exhaustive format tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_REPOSITORY];
