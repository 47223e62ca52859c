//! Account module.
//!
//! Read models for the collaborators the booking engine consults but does
//! not own: user accounts, the client directory and the session-type
//! catalog. Their CRUD lives outside this crate.

mod client;
mod session_type;
mod user;

pub use client::ClientRecord;
pub use session_type::{normalize_type_name, SessionType};
pub use user::UserAccount;
