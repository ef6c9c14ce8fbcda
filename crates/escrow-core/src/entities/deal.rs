use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An escrow transaction between a seller and a buyer.
///
/// `d_id` is the human-facing sequential number. It is obtained from the
/// deal counter before the struct is built and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Deal {
    pub id: String,
    pub d_id: i64,
    pub name: String,
    pub seller: String,
    pub buyer: String,
    pub exchange: Option<String>,
    pub messages: Vec<String>,
    pub status: Option<String>,
    pub accepted_by_seller: bool,
    pub accepted_by_buyer: bool,
    pub created_at: DateTime<Utc>,
}

impl Deal {
    /// Build a freshly created deal from an already allocated sequence number.
    ///
    /// Acceptance flags start false, status unset, no messages.
    #[must_use]
    pub fn new(
        id: String,
        d_id: i64,
        name: &str,
        seller: &str,
        buyer: &str,
        exchange: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            d_id,
            name: name.to_string(),
            seller: seller.to_string(),
            buyer: buyer.to_string(),
            exchange: exchange.map(String::from),
            messages: Vec::new(),
            status: None,
            accepted_by_seller: false,
            accepted_by_buyer: false,
            created_at,
        }
    }

    /// Both sides have accepted.
    #[must_use]
    pub const fn fully_accepted(&self) -> bool {
        self.accepted_by_seller && self.accepted_by_buyer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_deal_starts_unaccepted() {
        let deal = Deal::new(
            "dea-00000001".into(),
            7,
            "laptop",
            "usr-s",
            "usr-b",
            None,
            Utc::now(),
        );
        assert_eq!(deal.d_id, 7);
        assert!(!deal.accepted_by_seller);
        assert!(!deal.accepted_by_buyer);
        assert!(!deal.fully_accepted());
        assert!(deal.status.is_none());
        assert!(deal.messages.is_empty());
    }
}
