//! User repository.
//!
//! Only the public handle is stored; credentials are managed elsewhere.

use escrow_core::entities::User;
use escrow_core::ids::PREFIX_USER;
use escrow_core::validate::require_non_empty;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, normalize_id, now, parse_datetime};
use crate::service::EscrowService;

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        username: row.get::<String>(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

impl EscrowService {
    /// # Errors
    ///
    /// `InvalidArgument` for a blank username, `Conflict` if it is taken.
    pub async fn create_user(&self, username: &str) -> Result<User, DatabaseError> {
        require_non_empty("username", username)?;
        let username = username.trim();
        let now = now();
        let id = self.db().generate_id(PREFIX_USER).await?;

        self.db()
            .execute(
                "create_user",
                "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
                libsql::params![id.as_str(), username, format_datetime(&now)],
            )
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    DatabaseError::Conflict(format!("username '{username}' is already taken"))
                } else {
                    e
                }
            })?;

        Ok(User {
            id,
            username: username.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// `NotFound` if no user has this ID.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let id = normalize_id(id);
        self.db()
            .query_opt(
                "get_user",
                "SELECT id, username, created_at FROM users WHERE id = ?1",
                [id.as_str()],
                row_to_user,
            )
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", &id))
    }

    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, DatabaseError> {
        self.db()
            .query_opt(
                "find_user_by_username",
                "SELECT id, username, created_at FROM users WHERE username = ?1",
                [username.trim()],
                row_to_user,
            )
            .await
    }
}
