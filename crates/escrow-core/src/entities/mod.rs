//! Entity structs for the escrow domain.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON output and schema
//! validation.

mod deal;
mod exchange;
mod notification;
mod review;
mod user;

pub use deal::Deal;
pub use exchange::Exchange;
pub use notification::Notification;
pub use review::{AuthoredReview, Review};
pub use user::User;
