//! Exchange repository. A deal may settle an exchange; feeds show its trade type.

use escrow_core::entities::Exchange;
use escrow_core::ids::PREFIX_EXCHANGE;
use escrow_core::validate::require_non_empty;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, now, parse_datetime};
use crate::service::EscrowService;

impl EscrowService {
    /// # Errors
    ///
    /// `InvalidArgument` for a blank trade type.
    pub async fn create_exchange(&self, trade_type: &str) -> Result<Exchange, DatabaseError> {
        require_non_empty("trade_type", trade_type)?;
        let now = now();
        let id = self.db().generate_id(PREFIX_EXCHANGE).await?;

        self.db()
            .execute(
                "create_exchange",
                "INSERT INTO exchanges (id, trade_type, created_at) VALUES (?1, ?2, ?3)",
                libsql::params![id.as_str(), trade_type, format_datetime(&now)],
            )
            .await?;

        Ok(Exchange {
            id,
            trade_type: trade_type.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// `NotFound` if no exchange has this ID.
    pub async fn get_exchange(&self, id: &str) -> Result<Exchange, DatabaseError> {
        self.db()
            .query_opt(
                "get_exchange",
                "SELECT id, trade_type, created_at FROM exchanges WHERE id = ?1",
                [id],
                |row| {
                    Ok(Exchange {
                        id: row.get::<String>(0)?,
                        trade_type: row.get::<String>(1)?,
                        created_at: parse_datetime(&row.get::<String>(2)?)?,
                    })
                },
            )
            .await?
            .ok_or_else(|| DatabaseError::not_found("exchange", id))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn create_and_get() {
        let svc = test_service().await;
        let exchange = svc.create_exchange("sell").await.unwrap();
        assert!(exchange.id.starts_with("exc-"));
        assert_eq!(svc.get_exchange(&exchange.id).await.unwrap(), exchange);
    }
}
