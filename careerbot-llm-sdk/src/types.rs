use serde::{Deserialize, Serialize};

use crate::tools::{Tool, ToolCall, ToolChoice};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Result of a tool invocation
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// A piece of message content: plain text, or a tool invocation requested by the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    ToolCall(ToolCall),
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: Vec<ContentBlock>,
    /// Links a tool-role message to the invocation it answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// Create a new text message
    pub fn text<S: Into<String>>(role: Role, text: S) -> Self {
        Self {
            role,
            content: vec![ContentBlock::Text { text: text.into() }],
            tool_call_id: None,
        }
    }

    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::text(Role::User, text)
    }

    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self::text(Role::Assistant, text)
    }

    /// Assistant turn that requested tool calls. Any accompanying text is kept
    /// ahead of the calls so the provider sees the turn exactly as produced.
    pub fn assistant_with_tool_calls<S: Into<String>>(text: S, calls: Vec<ToolCall>) -> Self {
        let text = text.into();
        let mut content = Vec::with_capacity(calls.len() + 1);
        if !text.is_empty() {
            content.push(ContentBlock::Text { text });
        }
        content.extend(calls.into_iter().map(ContentBlock::ToolCall));
        Self {
            role: Role::Assistant,
            content,
            tool_call_id: None,
        }
    }

    /// Tool-role message answering the invocation `tool_call_id`
    pub fn tool_result<S: Into<String>>(tool_call_id: S, content: S) -> Self {
        Self {
            role: Role::Tool,
            content: vec![ContentBlock::Text {
                text: content.into(),
            }],
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// Concatenated text blocks of this message
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::ToolCall(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tool invocations carried by this message
    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::ToolCall(call) => Some(call),
            ContentBlock::Text { .. } => None,
        })
    }
}

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Generic completion request (provider-agnostic)
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Messages for the conversation, oldest first
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Model to use (provider-specific)
    pub model: String,
    /// System prompt, sent ahead of `messages`
    pub system: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    /// Tools available to the model
    pub tools: Option<Vec<Tool>>,
    pub tool_choice: Option<ToolChoice>,
}

/// Generic completion response (provider-agnostic)
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text content
    pub content: Vec<ContentBlock>,
    pub role: Role,
    pub usage: Usage,
    pub stop_reason: Option<String>,
    /// Tool calls requested by the model
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl CompletionResponse {
    /// Text content joined across blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::ToolCall(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
