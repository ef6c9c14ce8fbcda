//! Service layer carrying every store operation.
//!
//! `EscrowService` wraps `EscrowDb` (raw database access) and the feed
//! settings. All repo methods are implemented as `impl EscrowService`
//! blocks under [`crate::repos`]. The service is `Send + Sync`; share it
//! across tasks behind an `Arc`.

use escrow_config::{EscrowConfig, FeedConfig};

use crate::EscrowDb;
use crate::error::DatabaseError;

pub struct EscrowService {
    db: EscrowDb,
    feed: FeedConfig,
}

impl EscrowService {
    /// Create a service over a local database with default settings.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = EscrowDb::open_local(db_path).await?;
        Ok(Self::from_db(db, FeedConfig::default()))
    }

    /// Create a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open(config: &EscrowConfig) -> Result<Self, DatabaseError> {
        let db = EscrowDb::open(&config.database).await?;
        Ok(Self::from_db(db, config.feed.clone()))
    }

    #[must_use]
    pub const fn from_db(db: EscrowDb, feed: FeedConfig) -> Self {
        Self { db, feed }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &EscrowDb {
        &self.db
    }

    #[must_use]
    pub const fn feed_config(&self) -> &FeedConfig {
        &self.feed
    }
}
