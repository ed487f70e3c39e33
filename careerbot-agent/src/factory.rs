use crate::config::Settings;
use crate::knowledge::KnowledgeStore;
use crate::notifier::{LogNotifier, Notifier, PushoverNotifier};
use crate::orchestrator::ChatOrchestrator;
use crate::tools::ToolRouter;
use careerbot_llm_sdk::client::LlmClient;
use careerbot_llm_sdk::openai::OpenAIClient;
use std::sync::Arc;

/// Which notifier to wire into the tool router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifierKind {
    #[default]
    Pushover,
    /// Log notifications instead of sending them
    LogOnly,
}

pub fn create_llm_client(settings: &Settings) -> anyhow::Result<Arc<dyn LlmClient>> {
    let client = OpenAIClient::new(settings.llm.api_key.clone())?
        .with_base_url(settings.llm.base_url.clone())
        .with_model(settings.llm.model.clone())
        .with_timeout(settings.llm.request_timeout)?;
    Ok(Arc::new(client))
}

pub fn create_notifier(
    settings: &Settings,
    kind: NotifierKind,
) -> anyhow::Result<Arc<dyn Notifier>> {
    let notifier: Arc<dyn Notifier> = match kind {
        NotifierKind::Pushover => Arc::new(PushoverNotifier::new(settings.pushover.clone())?),
        NotifierKind::LogOnly => Arc::new(LogNotifier),
    };
    Ok(notifier)
}

/// Assemble an orchestrator from its parts; the knowledge store is read here, once
pub fn create_orchestrator(
    settings: &Settings,
    client: Arc<dyn LlmClient>,
    notifier: Arc<dyn Notifier>,
) -> ChatOrchestrator {
    let knowledge = KnowledgeStore::load(&settings.knowledge);
    let router = Arc::new(ToolRouter::new(notifier));
    ChatOrchestrator::new(client, router, &knowledge, settings.chat.clone())
}

/// Build everything the chat surfaces need from loaded settings
pub fn create_orchestrator_from_settings(
    settings: &Settings,
    kind: NotifierKind,
) -> anyhow::Result<ChatOrchestrator> {
    let client = create_llm_client(settings)?;
    let notifier = create_notifier(settings, kind)?;
    Ok(create_orchestrator(settings, client, notifier))
}
