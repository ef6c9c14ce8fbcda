//! # escrow-core
//!
//! Core types shared by every escrow crate.
//!
//! - Entity structs for users, exchanges, deals, reviews, and notifications
//! - Role and notification-kind enums
//! - Deal participant/role resolution ([`access`])
//! - Feed item types and the pure feed merge ([`feed`])
//! - ID prefix constants and the deal counter name
//! - Input validation and cross-cutting error types

pub mod access;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod feed;
pub mod ids;
pub mod responses;
pub mod validate;
