//! Notification module.
//!
//! Preferences, event-type categorisation, delivery records and outcomes,
//! and the placeholder templates used for message bodies.

mod kind;
mod outcome;
mod preferences;
mod record;
mod template;

pub use kind::{Channel, NotificationType, PreferenceCategory};
pub use outcome::{DispatchOutcome, NotDeliveredReason};
pub use preferences::{NotificationPreferences, StoredPreferences};
pub use record::Notification;
pub use template::{
    render_or_default, MessageTemplate, TemplateContext, TemplateError, TemplateKey,
    ALLOWED_PLACEHOLDERS, MAX_TEMPLATE_LENGTH,
};
