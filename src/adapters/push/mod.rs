//! Push transports.
//!
//! - `LoggingPushTransport` - writes each push to the log; the default when
//!   no webhook is configured
//! - `WebhookPushTransport` - POSTs each push to an HTTP endpoint

mod logging;
mod webhook;

pub use logging::LoggingPushTransport;
pub use webhook::{WebhookPushConfig, WebhookPushTransport};
