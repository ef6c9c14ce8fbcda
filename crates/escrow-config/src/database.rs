//! libSQL database configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    ".escrow/escrow.db".to_string()
}

/// Upper bound for a single statement, in milliseconds.
const fn default_statement_timeout_ms() -> u64 {
    5000
}

/// How long `SQLite` waits on a locked database file, in milliseconds.
const fn default_busy_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file path, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            statement_timeout_ms: default_statement_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// In-memory database with default timeouts, for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    #[must_use]
    pub const fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }

    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty path or a zero
    /// statement timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.statement_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.statement_timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
