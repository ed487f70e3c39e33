//! One conversation turn: ask the model, resolve any tool calls it makes, and
//! repeat until it answers in text.

use crate::config::ChatSettings;
use crate::error::ChatError;
use crate::knowledge::KnowledgeStore;
use crate::prompts::system_prompt;
use crate::tools::ToolRouter;
use careerbot_llm_sdk::client::LlmClient;
use careerbot_llm_sdk::tools::{Tool, ToolCall, ToolChoice};
use careerbot_llm_sdk::types::{CompletionRequest, CompletionResponse, Message};
use std::sync::Arc;


/// What the model did on one completion
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Final text for the user
    Answer(String),
    /// The model wants tools resolved before it answers
    ToolCalls { text: String, calls: Vec<ToolCall> },
}

impl From<CompletionResponse> for ModelReply {
    fn from(response: CompletionResponse) -> Self {
        let text = response.text();
        match response.tool_calls {
            Some(calls) if !calls.is_empty() => ModelReply::ToolCalls { text, calls },
            _ => ModelReply::Answer(text),
        }
    }
}

#[derive(Debug)]
enum TurnState {
    AwaitingModel,
    ResolvingTools(Vec<ToolCall>),
}

/// Drives the model/tool loop for a persona grounded in the knowledge store
pub struct ChatOrchestrator {
    client: Arc<dyn LlmClient>,
    router: Arc<ToolRouter>,
    tools: Vec<Tool>,
    system_prompt: String,
    settings: ChatSettings,
}

impl ChatOrchestrator {
    pub fn new(
        client: Arc<dyn LlmClient>,
        router: Arc<ToolRouter>,
        knowledge: &KnowledgeStore,
        settings: ChatSettings,
    ) -> Self {
        let system_prompt = system_prompt(&settings.persona_name, knowledge.build_context());
        let tools = router.definitions();
        Self {
            client,
            router,
            tools,
            system_prompt,
            settings,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Answer `user_message` given the prior `history`.
    ///
    /// Returns the reply and the new history: `history` followed by the user
    /// message, any tool-call and tool-result entries, and the final answer.
    /// On error nothing is returned, so the caller's history stays as it was.
    pub async fn respond(
        &self,
        user_message: &str,
        history: &[Message],
    ) -> Result<(String, Vec<Message>), ChatError> {
        let mut transcript = history.to_vec();
        transcript.push(Message::user(user_message));

        let mut rounds = 0u32;
        let mut state = TurnState::AwaitingModel;

        loop {
            state = match state {
                TurnState::AwaitingModel => match self.ask_model(&transcript).await? {
                    ModelReply::Answer(reply) => {
                        tracing::info!(
                            rounds,
                            history_len = transcript.len() + 1,
                            "Turn complete"
                        );
                        transcript.push(Message::assistant(reply.clone()));
                        return Ok((reply, transcript));
                    }
                    ModelReply::ToolCalls { text, calls } => {
                        rounds += 1;
                        if rounds > self.settings.max_tool_rounds {
                            tracing::warn!(
                                limit = self.settings.max_tool_rounds,
                                "Model exceeded tool round limit, abandoning turn"
                            );
                            return Err(ChatError::ToolLoopLimit {
                                limit: self.settings.max_tool_rounds,
                            });
                        }
                        transcript.push(Message::assistant_with_tool_calls(text, calls.clone()));
                        TurnState::ResolvingTools(calls)
                    }
                },
                TurnState::ResolvingTools(calls) => {
                    for call in &calls {
                        let result = self.router.dispatch(call).await;
                        transcript.push(result.into_message());
                    }
                    TurnState::AwaitingModel
                }
            };
        }
    }

    async fn ask_model(&self, transcript: &[Message]) -> Result<ModelReply, ChatError> {
        let request = CompletionRequest {
            messages: transcript.to_vec(),
            max_tokens: self.settings.max_tokens,
            model: self.client.model_name().to_string(),
            system: Some(self.system_prompt.clone()),
            temperature: Some(self.settings.temperature),
            top_p: Some(self.settings.top_p),
            tools: Some(self.tools.clone()),
            tool_choice: Some(ToolChoice::Auto),
        };

        tracing::debug!(messages = request.messages.len(), "Requesting completion");

        let response = self.client.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, "Completion failed");
            e
        })?;

        Ok(ModelReply::from(response))
    }
}

/// A single visitor's conversation held in memory
pub struct Conversation {
    orchestrator: Arc<ChatOrchestrator>,
    history: Vec<Message>,
}

impl Conversation {
    pub fn new(orchestrator: Arc<ChatOrchestrator>) -> Self {
        Self {
            orchestrator,
            history: Vec::new(),
        }
    }

    /// Send a user message. History only advances when the turn succeeds.
    pub async fn send(&mut self, text: &str) -> Result<String, ChatError> {
        let (reply, history) = self.orchestrator.respond(text, &self.history).await?;
        self.history = history;
        Ok(reply)
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }
}
