//! ID prefixes and counter names.
//!
//! Record IDs are `{prefix}-{8 hex chars}`, minted by the database layer.
//! Sequential deal numbers come from the named counter [`DEAL_COUNTER`].

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_EXCHANGE: &str = "exc";
pub const PREFIX_DEAL: &str = "dea";
pub const PREFIX_REVIEW: &str = "rev";
pub const PREFIX_NOTIFICATION: &str = "ntf";

/// Every prefix in use, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_EXCHANGE,
    PREFIX_DEAL,
    PREFIX_REVIEW,
    PREFIX_NOTIFICATION,
];

/// Counter that mints `Deal::d_id`.
pub const DEAL_COUNTER: &str = "deals";

/// Format a prefixed ID from a prefix and its random hex part.
#[must_use]
pub fn format_id(prefix: &str, hex: &str) -> String {
    format!("{prefix}-{hex}")
}
