//! Policy module.
//!
//! Versioned cancellation/reschedule policy: the append-only version chain,
//! the snapshot frozen onto each session, and the lead-time window check
//! shared by cancel and reschedule.

mod events;
mod log;
mod terms;
mod window;

pub use events::PolicyVersionCreated;
pub use log::PolicyLog;
pub use terms::{CancellationPolicy, PolicySettings, PolicySnapshot, MAX_POLICY_HOURS};
pub use window::{
    check_lead_time, format_lead_time, required_lead_minutes, LeadTimeViolation, PolicyAction,
};
