//! Sequence allocator: named counters minting unique, increasing integers.
//!
//! Allocation is one upsert-and-return statement, so the storage engine does
//! the read-modify-write atomically. No other module touches `counters`.

use crate::error::DatabaseError;
use crate::service::EscrowService;

impl EscrowService {
    /// Increment `counter` and return its new value.
    ///
    /// A missing counter is created at 1. For N concurrent calls on a fresh
    /// counter the returned values are exactly `1..=N`.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the statement fails. On
    /// `DatabaseError::Timeout` the increment may or may not have been
    /// applied; reconcile with [`Self::current_sequence`] before relying on
    /// any value.
    pub async fn allocate(&self, counter: &str) -> Result<i64, DatabaseError> {
        let result = self
            .db()
            .query_one(
                "allocate",
                "INSERT INTO counters (name, seq) VALUES (?1, 1)
                 ON CONFLICT(name) DO UPDATE SET seq = seq + 1
                 RETURNING seq",
                [counter],
                |row| Ok(row.get::<i64>(0)?),
            )
            .await;

        match result {
            Ok(seq) => {
                tracing::debug!(counter, seq, "sequence allocated");
                Ok(seq)
            }
            Err(err @ DatabaseError::Timeout { .. }) => {
                tracing::warn!(
                    counter,
                    "allocation outcome unknown after timeout; value must not be used"
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Read a counter without changing it. `None` if it was never allocated.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn current_sequence(&self, counter: &str) -> Result<Option<i64>, DatabaseError> {
        self.db()
            .query_opt(
                "current_sequence",
                "SELECT seq FROM counters WHERE name = ?1",
                [counter],
                |row| Ok(row.get::<i64>(0)?),
            )
            .await
    }
}
