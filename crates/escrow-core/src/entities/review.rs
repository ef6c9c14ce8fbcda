use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Feedback one deal participant leaves about the other.
///
/// At most one review exists per `(author, deal)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    /// Subject of the review.
    pub user: String,
    pub author: String,
    pub comment: String,
    pub rating: u8,
    pub deal: String,
    pub created_at: DateTime<Utc>,
}

/// A review joined with its author's username, as shown on a profile.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub author_username: String,
}
