//! In-memory template store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notification::{MessageTemplate, TemplateKey};
use crate::ports::TemplateStore;

#[derive(Default)]
pub struct InMemoryTemplateStore {
    templates: RwLock<HashMap<(UserId, TemplateKey), MessageTemplate>>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn find(
        &self,
        owner: &UserId,
        key: TemplateKey,
    ) -> Result<Option<MessageTemplate>, DomainError> {
        Ok(self
            .templates
            .read()
            .await
            .get(&(owner.clone(), key))
            .cloned())
    }

    async fn save(&self, owner: &UserId, template: &MessageTemplate) -> Result<(), DomainError> {
        self.templates
            .write()
            .await
            .insert((owner.clone(), template.key()), template.clone());
        Ok(())
    }
}
