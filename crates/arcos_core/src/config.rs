//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//!
//! # Invariants
//! - `log_level` always holds a level accepted by `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

/// Database file used when `ARCOS_DB_PATH` is unset.
pub const DEFAULT_DB_FILE_NAME: &str = "arcos.sqlite3";

pub const ENV_DB_PATH: &str = "ARCOS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ARCOS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ARCOS_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    /// - Returns a message when `ARCOS_LOG_LEVEL` names an unknown level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = var(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = var(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level)?;
        }
        config.log_dir = var(ENV_LOG_DIR).map(PathBuf::from);

        Ok(config)
    }
}
