//! SaveTemplateHandler - stores a photographer's message template.
//!
//! Placeholders are checked here, at save time. Rendering never fails.

use std::sync::Arc;

use crate::application::services::{enforce, load_actor};
use crate::domain::foundation::{authorize, AuthorizationContext, Capability, CommandMetadata, UserId};
use crate::domain::notification::{MessageTemplate, TemplateKey};
use crate::domain::session::BookingError;
use crate::ports::{AccountStore, TemplateStore};

#[derive(Debug, Clone)]
pub struct SaveTemplateCommand {
    pub owner_id: UserId,
    pub key: TemplateKey,
    pub body: String,
}

pub struct SaveTemplateHandler {
    accounts: Arc<dyn AccountStore>,
    templates: Arc<dyn TemplateStore>,
}

impl SaveTemplateHandler {
    pub fn new(accounts: Arc<dyn AccountStore>, templates: Arc<dyn TemplateStore>) -> Self {
        Self {
            accounts,
            templates,
        }
    }

    pub async fn handle(
        &self,
        cmd: SaveTemplateCommand,
        metadata: CommandMetadata,
    ) -> Result<MessageTemplate, BookingError> {
        let actor = load_actor(self.accounts.as_ref(), &metadata.user_id).await?;
        let ctx = AuthorizationContext::new(
            actor.id.clone(),
            actor.role,
            "save",
            "Template",
            format!("{}/{}", cmd.owner_id, cmd.key),
        );
        enforce(authorize(&ctx, Capability::ManageTemplates), "save")?;
        enforce(ctx.require_owner(&cmd.owner_id), "save")?;

        let template = MessageTemplate::new(cmd.key, cmd.body)?;
        self.templates.save(&cmd.owner_id, &template).await?;

        tracing::info!(owner_id = %cmd.owner_id, key = %cmd.key, "Template saved");
        Ok(template)
    }
}
