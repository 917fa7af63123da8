//! Harness configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. Command-line flags in the `tester` binary
//! override whatever is loaded here.

use std::path::{Path, PathBuf};

use crate::errors::{SharedError, SharedResult};

pub const ENV_PROJECT_ROOT: &str = "HARNESS_PROJECT_ROOT";
pub const ENV_DB_PATH: &str = "HARNESS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "HARNESS_LOG_LEVEL";
pub const ENV_MEMBERSHIP_YEAR: &str = "HARNESS_MEMBERSHIP_YEAR";

/// Database file used by the end-to-end suite, relative to the project root
pub const DEFAULT_DB_RELATIVE_PATH: &str = "data/ysh-robot.db";
pub const DEFAULT_MEMBERSHIP_YEAR: i32 = 2026;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Root of the application under test (working directory of the server)
    pub project_root: PathBuf,
    /// SQLite database shared with the server under test
    pub db_path: PathBuf,
    pub log_level: String,
    /// Year used when deriving member numbers
    pub membership_year: i32,
}

impl HarnessConfig {
    /// Configuration rooted at `project_root` with every other value defaulted
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            db_path: default_db_path(&project_root),
            project_root,
            log_level: "info".to_string(),
            membership_year: DEFAULT_MEMBERSHIP_YEAR,
        }
    }

    /// Load from the process environment after reading an optional `.env`
    pub fn from_env() -> SharedResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_root = lookup(ENV_PROJECT_ROOT)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::for_project(project_root);

        if let Some(db_path) = lookup(ENV_DB_PATH) {
            config.db_path = PathBuf::from(db_path);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = validate_log_level(&level)?;
        }

        if let Some(year) = lookup(ENV_MEMBERSHIP_YEAR) {
            config.membership_year = year.trim().parse().map_err(|_| SharedError::InvalidConfig {
                field: ENV_MEMBERSHIP_YEAR.to_string(),
                value: year.clone(),
            })?;
        }

        Ok(config)
    }

    /// Override the project root; a database path derived from the old root follows it
    pub fn with_project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        if self.db_path == default_db_path(&self.project_root) {
            self.db_path = default_db_path(&project_root);
        }
        self.project_root = project_root;
        self
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn with_log_level(mut self, level: &str) -> SharedResult<Self> {
        self.log_level = validate_log_level(level)?;
        Ok(self)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::for_project(".")
    }
}

pub fn default_db_path(project_root: &Path) -> PathBuf {
    project_root.join(DEFAULT_DB_RELATIVE_PATH)
}

fn validate_log_level(level: &str) -> SharedResult<String> {
    let normalized = level.trim().to_lowercase();
    if LOG_LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(SharedError::InvalidConfig {
            field: ENV_LOG_LEVEL.to_string(),
            value: level.to_string(),
        })
    }
}
