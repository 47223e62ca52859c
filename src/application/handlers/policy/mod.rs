//! Cancellation policy handlers.

mod create_policy_version;
mod get_policy;

pub use create_policy_version::{CreatePolicyVersionCommand, CreatePolicyVersionHandler};
pub use get_policy::{GetPolicyHandler, GetPolicyQuery};
