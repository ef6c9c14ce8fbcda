//! Notification feed configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Keep at most this many feed items after ordering. `0` keeps all.
    #[serde(default)]
    pub max_items: u32,
}

impl FeedConfig {
    /// The truncation limit, `None` when unlimited.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        match self.max_items {
            0 => None,
            n => usize::try_from(n).ok(),
        }
    }
}
