//! Template store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notification::{MessageTemplate, TemplateKey};

/// Per-photographer message templates. Only validated templates are stored.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn find(
        &self,
        owner: &UserId,
        key: TemplateKey,
    ) -> Result<Option<MessageTemplate>, DomainError>;

    /// Inserts or replaces the owner's template for `template.key()`.
    async fn save(&self, owner: &UserId, template: &MessageTemplate) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn TemplateStore) {}
    }
}
