//! Cross-cutting error types.
//!
//! Storage failures, conflicts, and authorization failures live in
//! `escrow-db`'s `DatabaseError`; this type covers what can go wrong
//! before any storage is touched.

use thiserror::Error;

/// Errors that can be raised by any escrow crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (empty field, rating out of range, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
