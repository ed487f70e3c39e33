use crate::notifier::Notifier;
use async_trait::async_trait;
use careerbot_llm_sdk::client::LlmClient;
use careerbot_llm_sdk::error::LlmError;
use careerbot_llm_sdk::tools::ToolCall;
use careerbot_llm_sdk::types::{
    CompletionRequest, CompletionResponse, ContentBlock, Role, Usage,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Notifier that keeps every message it was asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) {
        self.sent.lock().unwrap().push(text.to_string());
    }
}

/// One scripted model turn
pub enum Scripted {
    Text(String),
    ToolCalls(Vec<ToolCall>),
    Fail(LlmError),
}

/// LLM client that replays scripted turns and records each request
#[derive(Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Text("(script exhausted)".to_string()));

        match next {
            Scripted::Text(text) => Ok(CompletionResponse {
                content: vec![ContentBlock::Text { text }],
                role: Role::Assistant,
                usage: Usage::default(),
                stop_reason: Some("stop".to_string()),
                tool_calls: None,
            }),
            Scripted::ToolCalls(calls) => Ok(CompletionResponse {
                content: Vec::new(),
                role: Role::Assistant,
                usage: Usage::default(),
                stop_reason: Some("tool_calls".to_string()),
                tool_calls: Some(calls),
            }),
            Scripted::Fail(error) => Err(error),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall::new(id.to_string(), name.to_string(), arguments)
}
