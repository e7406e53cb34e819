//! # harbor-config
//!
//! Layered configuration loading for Harbor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HARBOR_*` prefix, `__` as separator)
//! 2. Project-level `.harbor/config.toml`
//! 3. User-level `~/.config/harbor/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HARBOR_DATABASE__PATH` -> `database.path`,
//! `HARBOR_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`, etc. The `__`
//! (double underscore) separates nested config sections.

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HarborConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HarborConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if `.env`
    /// loading is wanted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or merge.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads the `.env` file from the current directory (if present) before
    /// building the figment. Typical entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or merge.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_config) = Self::user_config_path() {
            figment = figment.merge(Toml::file(user_config));
        }
        figment = figment.merge(Toml::file(".harbor/config.toml"));

        figment.merge(Env::prefixed("HARBOR_").split("__"))
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("harbor").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_without_sources() {
        figment::Jail::expect_with(|_jail| {
            let config = HarborConfig::load().unwrap();
            assert_eq!(config.database.path, "harbor.db");
            assert_eq!(config.general.default_limit, 20);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_project_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".harbor")?;
            jail.create_file(
                ".harbor/config.toml",
                r#"
                [database]
                path = "from-toml.db"

                [general]
                default_limit = 50
                "#,
            )?;
            jail.set_env("HARBOR_DATABASE__PATH", "from-env.db");

            let config = HarborConfig::load().unwrap();
            assert_eq!(config.database.path, "from-env.db");
            assert_eq!(config.general.default_limit, 50);
            Ok(())
        });
    }

    #[test]
    fn nested_env_mapping() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HARBOR_GENERAL__DEFAULT_LIMIT", "7");
            let config = HarborConfig::load().unwrap();
            assert_eq!(config.general.default_limit, 7);
            Ok(())
        });
    }
}
