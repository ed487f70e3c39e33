use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use crate::{
    error::LlmError,
    openai::{
        tools::OpenAIToolFormat,
        types::{
            OpenAIChatCompletionRequest, OpenAIChatCompletionResponse, OpenAIErrorResponse,
            OpenAIMessage, OpenAIRole,
        },
    },
    tools::ProviderToolFormat,
    types::{CompletionRequest, CompletionResponse, ContentBlock, Message, Role, Usage},
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI LLM client (Chat Completions API)
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    timeout_secs: u64,
    http_client: reqwest::Client,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        Ok(Self {
            api_key,
            base_url: "https://api.openai.com".to_string(),
            model: crate::models::openai::GPT_4O_MINI_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            http_client: build_http_client(DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model reported by [`crate::client::LlmClient::model_name`]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Bound every request by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.timeout_secs = timeout.as_secs();
        self.http_client = build_http_client(self.timeout_secs)?;
        Ok(self)
    }

    /// Create a chat completion using the OpenAI Chat Completions API
    pub async fn create_chat_completion(
        &self,
        request: OpenAIChatCompletionRequest,
    ) -> Result<OpenAIChatCompletionResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| LlmError::authentication("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, |t| t.len()),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, self.timeout_secs))?;

        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| LlmError::from_transport(e, self.timeout_secs))?;
            serde_json::from_str::<OpenAIChatCompletionResponse>(&body)
                .map_err(|e| LlmError::malformed(format!("Failed to parse response: {}", e)))
        } else {
            // Read retry-after before the body consumes the response
            let retry_after = if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
            } else {
                None
            };

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let message = serde_json::from_str::<OpenAIErrorResponse>(&error_text)
                .map(|r| r.error.message)
                .unwrap_or(error_text);

            Err(error_for_status(status, message, retry_after))
        }
    }
}

fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LlmError::Network { source: e })
}

fn error_for_status(
    status: reqwest::StatusCode,
    message: String,
    retry_after: Option<u64>,
) -> LlmError {
    match status {
        reqwest::StatusCode::BAD_REQUEST => LlmError::invalid_request(message),
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            LlmError::authentication(message)
        }
        reqwest::StatusCode::PAYLOAD_TOO_LARGE => LlmError::invalid_request("Request too large"),
        reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::rate_limit(message, retry_after),
        _ => LlmError::api_error(status.as_u16(), message),
    }
}

/// Map a unified history entry onto the Chat Completions wire format
fn to_openai_message(message: &Message) -> OpenAIMessage {
    match message.role {
        Role::Tool => OpenAIMessage::tool_result(
            message.tool_call_id.clone().unwrap_or_default(),
            message.text_content(),
        ),
        Role::Assistant if message.tool_calls().next().is_some() => {
            OpenAIMessage::assistant_with_tools(
                message.text_content(),
                message
                    .tool_calls()
                    .map(OpenAIToolFormat::to_provider_tool_call)
                    .collect(),
            )
        }
        Role::Assistant => OpenAIMessage::assistant(message.text_content()),
        Role::User => OpenAIMessage::user(message.text_content()),
        Role::System => OpenAIMessage::system(message.text_content()),
    }
}

#[async_trait]
impl crate::client::LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(OpenAIMessage::system(system.clone()));
        }
        messages.extend(request.messages.iter().map(to_openai_message));

        let tools = request.tools.as_ref().map(|tools| {
            tools
                .iter()
                .map(OpenAIToolFormat::to_provider_tool)
                .collect::<Vec<_>>()
        });
        let tool_choice = match (&tools, &request.tool_choice) {
            (Some(_), Some(choice)) => Some(OpenAIToolFormat::to_provider_tool_choice(choice)),
            _ => None,
        };

        let openai_request = OpenAIChatCompletionRequest {
            model: request.model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature,
            top_p: request.top_p,
            tools,
            tool_choice,
        };

        let openai_response = self.create_chat_completion(openai_request).await?;

        let usage = openai_response.usage.unwrap_or_default();
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::malformed("No completion choices returned"))?;

        let content = choice
            .message
            .content
            .filter(|text| !text.is_empty())
            .map(|text| vec![ContentBlock::Text { text }])
            .unwrap_or_default();

        let tool_calls = choice
            .message
            .tool_calls
            .filter(|calls| !calls.is_empty())
            .map(|calls| {
                calls
                    .iter()
                    .map(OpenAIToolFormat::from_provider_tool_call)
                    .collect()
            });

        Ok(CompletionResponse {
            content,
            role: match choice.message.role {
                OpenAIRole::System => Role::System,
                OpenAIRole::User => Role::User,
                OpenAIRole::Assistant | OpenAIRole::Tool => Role::Assistant,
            },
            usage: Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
            stop_reason: choice.finish_reason,
            tool_calls,
        })
    }

    fn provider_name(&self) -> &str {
        crate::providers::OPENAI
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
