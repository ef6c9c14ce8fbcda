use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NotificationKind;

/// An event surfaced to one recipient.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    /// Recipient.
    pub user: String,
    pub sender: Option<String>,
    pub deal: String,
    pub created_at: DateTime<Utc>,
}
