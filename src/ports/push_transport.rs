//! Push transport port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::notification::Notification;

/// Delivers a notification over the push channel.
///
/// Failures are reported to the dispatcher, which logs them and drops the
/// push channel from the record; they never fail the dispatch itself.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError>;
}
