use anyhow::bail;
use schemars::{JsonSchema, Schema, schema_for};

use escrow_core::entities::{AuthoredReview, Deal, Exchange, Notification, Review, User};
use escrow_core::feed::FeedItem;
use escrow_core::responses::{
    DealListResponse, FeedResponse, RoleResponse, SequenceResponse, UserProfileResponse,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `escrow schema`.
const SCHEMA_TYPES: &[&str] = &[
    "user",
    "exchange",
    "deal",
    "review",
    "authored-review",
    "notification",
    "feed-item",
    "user-profile",
    "role",
    "deal-list",
    "feed",
    "sequence",
];

/// Handle `escrow schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(schema) = schema_by_name(&args.type_name) else {
        bail!(
            "unknown schema type '{}' (expected one of: {})",
            args.type_name,
            SCHEMA_TYPES.join(", ")
        );
    };
    output(&schema, flags.format)
}

fn schema_by_name(name: &str) -> Option<Schema> {
    let schema = match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "user" => of::<User>(),
        "exchange" => of::<Exchange>(),
        "deal" => of::<Deal>(),
        "review" => of::<Review>(),
        "authored-review" => of::<AuthoredReview>(),
        "notification" => of::<Notification>(),
        "feed-item" => of::<FeedItem>(),
        "user-profile" => of::<UserProfileResponse>(),
        "role" => of::<RoleResponse>(),
        "deal-list" => of::<DealListResponse>(),
        "feed" => of::<FeedResponse>(),
        "sequence" => of::<SequenceResponse>(),
        _ => return None,
    };
    Some(schema)
}

fn of<T: JsonSchema>() -> Schema {
    schema_for!(T)
}
