//! Notification repository.
//!
//! Notifications are produced by whoever observes the event (a new message,
//! an acceptance, a review) and only read back through the feed.

use chrono::{DateTime, SubsecRound, Utc};
use escrow_core::entities::Notification;
use escrow_core::enums::NotificationKind;
use escrow_core::ids::PREFIX_NOTIFICATION;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, normalize_id, parse_datetime, parse_enum};
use crate::service::EscrowService;

impl EscrowService {
    /// Store a notification for `user_id` about `deal_id`.
    ///
    /// `created_at` is kept at microsecond precision.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the recipient, sender, or deal does not exist; a
    /// storage-kind error otherwise.
    pub async fn record_notification(
        &self,
        kind: NotificationKind,
        user_id: &str,
        sender_id: Option<&str>,
        deal_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Notification, DatabaseError> {
        let created_at = created_at.trunc_subsecs(6);
        let notification = Notification {
            id: self.db().generate_id(PREFIX_NOTIFICATION).await?,
            kind,
            user: normalize_id(user_id),
            sender: sender_id.map(normalize_id),
            deal: normalize_id(deal_id),
            created_at,
        };

        self.db()
            .execute(
                "record_notification",
                "INSERT INTO notifications (id, kind, user_id, sender_id, deal_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    notification.id.as_str(),
                    kind.as_str(),
                    notification.user.as_str(),
                    notification.sender.as_deref(),
                    notification.deal.as_str(),
                    format_datetime(&created_at)
                ],
            )
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    DatabaseError::InvalidArgument(
                        "notification references an unknown user or deal".into(),
                    )
                } else {
                    e
                }
            })?;

        tracing::debug!(notification_id = %notification.id, %kind, "notification recorded");
        Ok(notification)
    }

    /// Every notification addressed to `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn list_notifications(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, DatabaseError> {
        self.db()
            .query_map(
                "list_notifications",
                "SELECT id, kind, user_id, sender_id, deal_id, created_at
                 FROM notifications WHERE user_id = ?1
                 ORDER BY created_at DESC",
                [normalize_id(user_id)],
                |row| {
                    Ok(Notification {
                        id: row.get::<String>(0)?,
                        kind: parse_enum(&row.get::<String>(1)?)?,
                        user: row.get::<String>(2)?,
                        sender: get_opt_string(row, 3)?,
                        deal: row.get::<String>(4)?,
                        created_at: parse_datetime(&row.get::<String>(5)?)?,
                    })
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use escrow_core::enums::NotificationKind;

    use crate::error::ErrorKind;
    use crate::helpers::now;
    use crate::test_support::helpers::{deal_between, test_service};

    #[tokio::test]
    async fn record_and_list() {
        let svc = test_service().await;
        let (seller, buyer, deal) = deal_between(&svc, "s", "b").await;

        let recorded = svc
            .record_notification(
                NotificationKind::DealCreated,
                &buyer.id,
                Some(&seller.id),
                &deal.id,
                now(),
            )
            .await
            .unwrap();

        let listed = svc.list_notifications(&buyer.id).await.unwrap();
        assert_eq!(listed, vec![recorded]);
        assert!(svc.list_notifications(&seller.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_deal_is_invalid() {
        let svc = test_service().await;
        let (_, buyer, _) = deal_between(&svc, "s", "b").await;
        let err = svc
            .record_notification(
                NotificationKind::Message,
                &buyer.id,
                None,
                "dea-00000000",
                now(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
