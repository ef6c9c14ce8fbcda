//! Response types returned as JSON by the `escrow` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AuthoredReview, Deal, User};
use crate::enums::Role;
use crate::feed::FeedItem;

/// Response from `escrow user profile`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UserProfileResponse {
    pub user: User,
    pub reviews: Vec<AuthoredReview>,
    /// Mean rating, `None` when the user has no reviews.
    pub average_rating: Option<f64>,
}

/// Response from `escrow deal role`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoleResponse {
    pub deal_id: String,
    pub user_id: String,
    pub role: Role,
    pub is_participant: bool,
}

/// Response from `escrow deal list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DealListResponse {
    pub user_id: String,
    pub deals: Vec<Deal>,
}

/// Response from `escrow feed`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeedResponse {
    pub user_id: String,
    pub items: Vec<FeedItem>,
}

/// Response from `escrow sequence current`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SequenceResponse {
    pub counter: String,
    pub seq: Option<i64>,
}
