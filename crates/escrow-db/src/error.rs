//! Database error types for escrow-db.

use escrow_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations.
///
/// The first four variants are caller-facing outcomes; everything else is a
/// storage failure. Use [`DatabaseError::kind`] to tell them apart.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Malformed input (empty name, rating outside 1..=5, unknown participant).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced entity does not exist.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// The caller lacks the required relationship to the entity.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A statement did not finish within the configured timeout. Whether it
    /// was applied is unknown.
    #[error("{operation} timed out after {after_ms} ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`DatabaseError`] for the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Forbidden,
    Conflict,
    Storage,
}

impl ErrorKind {
    /// Only storage failures may succeed on a retry.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Storage)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl DatabaseError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::Timeout { .. }
            | Self::LibSql(_)
            | Self::Other(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether libSQL rejected a write because of a `UNIQUE` constraint.
    ///
    /// Matched on the message: the extended result code is not exposed
    /// uniformly across libSQL backends.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::LibSql(e) => e.to_string().contains("UNIQUE constraint failed"),
            _ => false,
        }
    }

    /// Whether libSQL rejected a write because a referenced row is missing.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::LibSql(e) => e.to_string().contains("FOREIGN KEY constraint failed"),
            _ => false,
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::InvalidArgument(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
