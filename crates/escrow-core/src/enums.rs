//! Roles and notification kinds.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the value stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A user's position in a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seller,
    Buyer,
    None,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seller => "seller",
            Self::Buyer => "buyer",
            Self::None => "none",
        }
    }

    /// True for `Seller` and `Buyer`.
    #[must_use]
    pub const fn is_participant(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// Kind of event a notification surfaces.
///
/// `Message` notifications are grouped per deal in the feed; every other kind
/// is shown individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    DealCreated,
    DealAccepted,
    StatusChanged,
    ReviewReceived,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::DealCreated => "deal_created",
            Self::DealAccepted => "deal_accepted",
            Self::StatusChanged => "status_changed",
            Self::ReviewReceived => "review_received",
        }
    }

    #[must_use]
    pub const fn is_message(self) -> bool {
        matches!(self, Self::Message)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
