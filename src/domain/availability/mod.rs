//! Availability module.
//!
//! Weekly working-hour slots (`HH:mm`, day 0 = Sunday) and the matcher that
//! decides whether a candidate booking fits them.

mod matcher;
mod slot;

pub use matcher::{check_availability, AvailabilityDecision};
pub use slot::{AvailabilitySlot, TimeOfDay};
