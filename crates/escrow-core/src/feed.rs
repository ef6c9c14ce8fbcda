//! Feed item types and the merge that orders them.
//!
//! A user's feed mixes two shapes: one [`MessageSummary`] per deal with
//! unread message notifications, and one [`SingleNotification`] per
//! notification of any other kind. [`merge_feed`] is a pure function of both
//! lists; the database layer reads them and hands them over.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NotificationKind;

/// The deal fields shown alongside a feed item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DealSummary {
    pub id: String,
    pub d_id: i64,
    pub name: String,
    pub seller: String,
    pub buyer: String,
    pub status: Option<String>,
    pub accepted_by_seller: bool,
    pub accepted_by_buyer: bool,
    pub created_at: DateTime<Utc>,
    /// Trade type of the deal's exchange, when it has one.
    pub trade_type: Option<String>,
}

/// Who triggered a notification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SenderSummary {
    pub id: String,
    pub username: String,
}

/// All message notifications of one deal, collapsed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageSummary {
    pub deal: DealSummary,
    pub count: u32,
    pub last_at: DateTime<Utc>,
}

/// A non-message notification, shown as is.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SingleNotification {
    pub id: String,
    pub kind: NotificationKind,
    pub sender: Option<SenderSummary>,
    pub deal: DealSummary,
    pub created_at: DateTime<Utc>,
}

/// One entry of a user's feed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum FeedItem {
    MessageSummary(MessageSummary),
    Notification(SingleNotification),
}

impl FeedItem {
    /// The instant the item is ordered by: `last_at` for summaries,
    /// `created_at` for single notifications.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MessageSummary(summary) => summary.last_at,
            Self::Notification(single) => single.created_at,
        }
    }
}

/// Merge both branches into one feed, newest first.
///
/// Summaries are placed before single notifications and the sort is stable,
/// so on an exact timestamp tie a summary precedes a single notification and
/// items of the same branch keep their input order. `max_items` truncates
/// after ordering.
#[must_use]
pub fn merge_feed(
    summaries: Vec<MessageSummary>,
    singles: Vec<SingleNotification>,
    max_items: Option<usize>,
) -> Vec<FeedItem> {
    let mut items: Vec<FeedItem> = Vec::with_capacity(summaries.len() + singles.len());
    items.extend(summaries.into_iter().map(FeedItem::MessageSummary));
    items.extend(singles.into_iter().map(FeedItem::Notification));

    items.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

    if let Some(max) = max_items {
        items.truncate(max);
    }
    items
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0).unwrap()
    }

    fn deal(id: &str) -> DealSummary {
        DealSummary {
            id: id.to_string(),
            d_id: 1,
            name: "deal".into(),
            seller: "usr-s".into(),
            buyer: "usr-b".into(),
            status: None,
            accepted_by_seller: false,
            accepted_by_buyer: false,
            created_at: at(8, 0),
            trade_type: None,
        }
    }

    fn summary(deal_id: &str, last_at: DateTime<Utc>) -> MessageSummary {
        MessageSummary {
            deal: deal(deal_id),
            count: 2,
            last_at,
        }
    }

    fn single(id: &str, created_at: DateTime<Utc>) -> SingleNotification {
        SingleNotification {
            id: id.to_string(),
            kind: NotificationKind::DealAccepted,
            sender: None,
            deal: deal("dea-1"),
            created_at,
        }
    }

    #[test]
    fn newer_summary_precedes_older_notification() {
        let feed = merge_feed(
            vec![summary("dea-1", at(10, 5))],
            vec![single("ntf-1", at(10, 0))],
            None,
        );
        assert!(matches!(feed[0], FeedItem::MessageSummary(_)));
        assert!(matches!(feed[1], FeedItem::Notification(_)));
    }

    #[test]
    fn newer_notification_precedes_older_summary() {
        let feed = merge_feed(
            vec![summary("dea-1", at(9, 0))],
            vec![single("ntf-1", at(10, 0))],
            None,
        );
        assert!(matches!(feed[0], FeedItem::Notification(_)));
    }

    #[test]
    fn three_items_sorted_descending() {
        let feed = merge_feed(
            vec![summary("dea-1", at(10, 0))],
            vec![single("ntf-1", at(10, 5)), single("ntf-2", at(9, 55))],
            None,
        );
        let order: Vec<_> = feed.iter().map(FeedItem::timestamp).collect();
        assert_eq!(order, vec![at(10, 5), at(10, 0), at(9, 55)]);
    }

    #[test]
    fn ties_keep_summaries_first_and_input_order() {
        let feed = merge_feed(
            vec![summary("dea-1", at(10, 0)), summary("dea-2", at(10, 0))],
            vec![single("ntf-1", at(10, 0))],
            None,
        );
        let deals: Vec<_> = feed
            .iter()
            .map(|item| match item {
                FeedItem::MessageSummary(s) => s.deal.id.clone(),
                FeedItem::Notification(n) => n.id.clone(),
            })
            .collect();
        assert_eq!(deals, vec!["dea-1", "dea-2", "ntf-1"]);
    }

    #[test]
    fn max_items_truncates_after_sorting() {
        let feed = merge_feed(
            vec![summary("dea-1", at(8, 0))],
            vec![single("ntf-1", at(11, 0)), single("ntf-2", at(9, 0))],
            Some(2),
        );
        let order: Vec<_> = feed.iter().map(FeedItem::timestamp).collect();
        assert_eq!(order, vec![at(11, 0), at(9, 0)]);
    }

    #[test]
    fn empty_branches_give_empty_feed() {
        assert!(merge_feed(Vec::new(), Vec::new(), None).is_empty());
    }

    #[test]
    fn items_are_tagged_in_json() {
        let item = FeedItem::MessageSummary(summary("dea-1", at(10, 0)));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["item"], "message_summary");
        assert_eq!(json["count"], 2);

        let item = FeedItem::Notification(single("ntf-1", at(10, 0)));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["item"], "notification");
        assert_eq!(json["kind"], "deal_accepted");
    }
}
