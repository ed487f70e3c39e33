//! A career chatbot: answers questions about one person from their profile
//! documents and notifies them when a visitor leaves contact details or asks
//! something the documents don't cover.

pub mod config;
pub mod error;
pub mod factory;
pub mod knowledge;
pub mod notifier;
pub mod orchestrator;
pub mod prompts;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ChatSettings, ConfigError, Settings};
pub use error::ChatError;
pub use knowledge::{KnowledgeConfig, KnowledgeStore};
pub use notifier::{LogNotifier, Notifier, PushoverNotifier};
pub use orchestrator::{ChatOrchestrator, Conversation, ModelReply};
pub use tools::{CareerTool, ToolRouter};
