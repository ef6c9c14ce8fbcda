//! # escrow-db
//!
//! libSQL storage for the escrow deal broker.
//!
//! Holds users, exchanges, deals, reviews, notifications, and the named
//! counters that number deals. [`EscrowDb`] owns the connection, runs
//! migrations, and puts every statement under the configured timeout;
//! [`service::EscrowService`] carries the operations, split across
//! [`repos`].

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;

use std::future::Future;
use std::time::Duration;

use error::DatabaseError;
use escrow_config::DatabaseConfig;
use escrow_core::ids::format_id;
use libsql::Builder;
use libsql::params::IntoParams;

/// Central database handle.
///
/// The connection is shared by every caller: concurrent tasks holding the
/// same `EscrowDb` see one database, which is what makes counter allocation
/// collision-free without application locks.
pub struct EscrowDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    statement_timeout: Duration,
}

impl EscrowDb {
    /// Open a local database at the given path with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let config = DatabaseConfig {
            path: path.to_string(),
            ..DatabaseConfig::default()
        };
        Self::open(&config).await
    }

    /// Open the database described by `config`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(&config.path).build().await?;
        let conn = db.connect()?;

        // Must be per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        let mut pragma = conn
            .query(
                &format!("PRAGMA busy_timeout = {}", config.busy_timeout().as_millis()),
                (),
            )
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;
        pragma.next().await?;
        drop(pragma);

        let escrow_db = Self {
            db,
            conn,
            statement_timeout: config.statement_timeout(),
        };
        escrow_db.run_migrations().await?;
        tracing::debug!(path = %config.path, "escrow database opened");
        Ok(escrow_db)
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"dea-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let hex = self
            .query_one(
                "generate_id",
                "SELECT lower(hex(randomblob(4)))",
                (),
                |row| Ok(row.get::<String>(0)?),
            )
            .await?;
        Ok(format_id(prefix, &hex))
    }

    /// Run a single write statement under the statement timeout.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Timeout` if the deadline passes, or the
    /// libSQL error otherwise.
    pub async fn execute(
        &self,
        operation: &'static str,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<u64, DatabaseError> {
        self.with_timeout(operation, async {
            Ok(self.conn.execute(sql, params).await?)
        })
        .await
    }

    /// Run a query and decode every row, all under one statement timeout.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Timeout` if the deadline passes, the libSQL
    /// error, or whatever `map` returns for a row it cannot decode.
    pub async fn query_map<T, F>(
        &self,
        operation: &'static str,
        sql: &str,
        params: impl IntoParams,
        map: F,
    ) -> Result<Vec<T>, DatabaseError>
    where
        F: Fn(&libsql::Row) -> Result<T, DatabaseError>,
    {
        self.with_timeout(operation, async {
            let mut rows = self.conn.query(sql, params).await?;
            let mut out = Vec::new();
            while let Some(row) = rows.next().await? {
                out.push(map(&row)?);
            }
            Ok(out)
        })
        .await
    }

    /// Like [`Self::query_map`] but decodes only the first row, if any.
    ///
    /// # Errors
    ///
    /// Same as [`Self::query_map`].
    pub async fn query_opt<T, F>(
        &self,
        operation: &'static str,
        sql: &str,
        params: impl IntoParams,
        map: F,
    ) -> Result<Option<T>, DatabaseError>
    where
        F: Fn(&libsql::Row) -> Result<T, DatabaseError>,
    {
        self.with_timeout(operation, async {
            let mut rows = self.conn.query(sql, params).await?;
            match rows.next().await? {
                Some(row) => Ok(Some(map(&row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Like [`Self::query_opt`] but a missing row is `DatabaseError::NoResult`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::query_map`], plus `NoResult`.
    pub async fn query_one<T, F>(
        &self,
        operation: &'static str,
        sql: &str,
        params: impl IntoParams,
        map: F,
    ) -> Result<T, DatabaseError>
    where
        F: Fn(&libsql::Row) -> Result<T, DatabaseError>,
    {
        self.query_opt(operation, sql, params, map)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Bound a storage future by the statement timeout.
    ///
    /// An expired deadline says nothing about whether the statement ran.
    pub(crate) async fn with_timeout<T, Fut>(
        &self,
        operation: &'static str,
        fut: Fut,
    ) -> Result<T, DatabaseError>
    where
        Fut: Future<Output = Result<T, DatabaseError>>,
    {
        if let Ok(result) = tokio::time::timeout(self.statement_timeout, fut).await {
            result
        } else {
            let after_ms = u64::try_from(self.statement_timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(operation, after_ms, "storage call timed out");
            Err(DatabaseError::Timeout {
                operation,
                after_ms,
            })
        }
    }
}
