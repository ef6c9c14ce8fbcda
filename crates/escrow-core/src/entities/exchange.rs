use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The trade a deal settles. Only the trade type is surfaced in feeds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Exchange {
    pub id: String,
    pub trade_type: String,
    pub created_at: DateTime<Utc>,
}
