//! Database location configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "harbor.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. `":memory:"` is accepted for
    /// throwaway sessions.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_local_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "harbor.db");
    }
}
