//! Repository modules implementing the store operations.
//!
//! Each module adds methods to `EscrowService` via `impl EscrowService` blocks.

pub mod counter;
pub mod deal;
pub mod exchange;
pub mod feed;
pub mod notification;
pub mod review;
pub mod user;
