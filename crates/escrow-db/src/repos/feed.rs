//! Notification feed: grouped message counts and individual notifications,
//! read side by side and merged newest first.
//!
//! The two reads are independent and run concurrently. If either fails the
//! whole feed fails; a half-built feed is never returned.

use escrow_core::enums::NotificationKind;
use escrow_core::feed::{
    DealSummary, FeedItem, MessageSummary, SenderSummary, SingleNotification, merge_feed,
};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, normalize_id, parse_datetime, parse_enum};
use crate::service::EscrowService;

/// Deal columns shared by both branches.
const DEAL_SUMMARY_COLUMNS: &str = "d.id, d.d_id, d.name, d.seller_id, d.buyer_id, d.status, \
                                    d.accepted_by_seller, d.accepted_by_buyer, d.created_at, \
                                    e.trade_type";

fn row_to_deal_summary(row: &libsql::Row, start: i32) -> Result<DealSummary, DatabaseError> {
    Ok(DealSummary {
        id: row.get::<String>(start)?,
        d_id: row.get::<i64>(start + 1)?,
        name: row.get::<String>(start + 2)?,
        seller: row.get::<String>(start + 3)?,
        buyer: row.get::<String>(start + 4)?,
        status: get_opt_string(row, start + 5)?,
        accepted_by_seller: get_bool(row, start + 6)?,
        accepted_by_buyer: get_bool(row, start + 7)?,
        created_at: parse_datetime(&row.get::<String>(start + 8)?)?,
        trade_type: get_opt_string(row, start + 9)?,
    })
}

fn row_to_message_summary(row: &libsql::Row) -> Result<MessageSummary, DatabaseError> {
    let count = row.get::<i64>(0)?;
    Ok(MessageSummary {
        count: u32::try_from(count)
            .map_err(|e| DatabaseError::Query(format!("Invalid message count {count}: {e}")))?,
        last_at: parse_datetime(&row.get::<String>(1)?)?,
        deal: row_to_deal_summary(row, 2)?,
    })
}

fn row_to_single(row: &libsql::Row) -> Result<SingleNotification, DatabaseError> {
    let sender = match (get_opt_string(row, 2)?, get_opt_string(row, 3)?) {
        (Some(id), Some(username)) => Some(SenderSummary { id, username }),
        _ => None,
    };
    Ok(SingleNotification {
        id: row.get::<String>(0)?,
        kind: parse_enum(&row.get::<String>(1)?)?,
        sender,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        deal: row_to_deal_summary(row, 5)?,
    })
}

impl EscrowService {
    /// Build the feed for `user_id`, newest first.
    ///
    /// Truncated to `feed.max_items` when configured.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if either read fails.
    pub async fn feed_for(&self, user_id: &str) -> Result<Vec<FeedItem>, DatabaseError> {
        let user_id = normalize_id(user_id);
        let (summaries, singles) = tokio::try_join!(
            self.message_summaries(&user_id),
            self.single_notifications(&user_id),
        )?;

        tracing::debug!(
            user_id = %user_id,
            summaries = summaries.len(),
            singles = singles.len(),
            "feed branches loaded"
        );
        Ok(merge_feed(summaries, singles, self.feed_config().limit()))
    }

    /// One summary per deal with `message` notifications for `user_id`:
    /// how many there are and when the latest arrived.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn message_summaries(
        &self,
        user_id: &str,
    ) -> Result<Vec<MessageSummary>, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) AS cnt, MAX(n.created_at) AS last_at, {DEAL_SUMMARY_COLUMNS}
             FROM notifications n
             JOIN deals d ON d.id = n.deal_id
             LEFT JOIN exchanges e ON e.id = d.exchange_id
             WHERE n.user_id = ?1 AND n.kind = ?2
             GROUP BY n.deal_id
             ORDER BY last_at DESC"
        );
        self.db()
            .query_map(
                "message_summaries",
                &sql,
                libsql::params![normalize_id(user_id), NotificationKind::Message.as_str()],
                row_to_message_summary,
            )
            .await
    }

    /// Every non-`message` notification for `user_id` with sender username
    /// and deal summary.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails or a row
    /// cannot be decoded.
    pub async fn single_notifications(
        &self,
        user_id: &str,
    ) -> Result<Vec<SingleNotification>, DatabaseError> {
        let sql = format!(
            "SELECT n.id, n.kind, n.sender_id, s.username, n.created_at, {DEAL_SUMMARY_COLUMNS}
             FROM notifications n
             JOIN deals d ON d.id = n.deal_id
             LEFT JOIN users s ON s.id = n.sender_id
             LEFT JOIN exchanges e ON e.id = d.exchange_id
             WHERE n.user_id = ?1 AND n.kind != ?2
             ORDER BY n.created_at DESC"
        );
        self.db()
            .query_map(
                "single_notifications",
                &sql,
                libsql::params![normalize_id(user_id), NotificationKind::Message.as_str()],
                row_to_single,
            )
            .await
    }
}
