//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, time, errors, events, authorization)
//! - `account` - Users, client directory entries and session types
//! - `availability` - Weekly working hours and the availability matcher
//! - `policy` - Versioned cancellation policy and lead-time windows
//! - `session` - Session aggregate, lifecycle and reminder windows
//! - `notification` - Preferences, delivery records and message templates

pub mod account;
pub mod availability;
pub mod foundation;
pub mod notification;
pub mod policy;
pub mod session;
