use std::sync::Arc;

use crate::chat::contact::{ContactSender, LoggingContactSender, WebhookContactSender};
use crate::chat::registry::SessionRegistry;
use crate::chat::resolver::ChatResolver;
use crate::config::Config;
use crate::content::ContentStore;
use crate::llm_client::{ApiAvailability, CompletionClient};
use crate::matching::{ExperienceAgent, IntentMatcher};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore>,
    pub resolver: ChatResolver,
    pub sessions: SessionRegistry,
    /// Pluggable delivery for the contact form. Default: LoggingContactSender.
    /// WebhookContactSender when CONTACT_WEBHOOK_URL is set.
    pub contact_sender: Arc<dyn ContactSender>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let content = Arc::new(ContentStore::portfolio());
        let agent = ExperienceAgent::new(content.clone());
        let completion = CompletionClient::new(
            config.completion_settings(),
            agent.clone(),
            ApiAvailability::new(),
        )?;
        let resolver = ChatResolver::new(
            IntentMatcher::new(agent),
            completion,
            config.contact_form_delay,
        );

        let contact_sender: Arc<dyn ContactSender> = match &config.contact_webhook_url {
            Some(url) => Arc::new(WebhookContactSender::new(
                url.clone(),
                config.completion_timeout,
            )?),
            None => Arc::new(LoggingContactSender),
        };

        Ok(Self {
            content,
            resolver,
            sessions: SessionRegistry::new(config.session_settings()),
            contact_sender,
            config,
        })
    }
}
