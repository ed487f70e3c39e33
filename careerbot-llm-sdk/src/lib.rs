//! # careerbot LLM SDK
//!
//! Provider-agnostic chat types with first-class tool calling, and an OpenAI
//! Chat Completions client.
//!
//! ## Example
//!
//! ```rust,no_run
//! use careerbot_llm_sdk::client::LlmClient;
//! use careerbot_llm_sdk::openai::OpenAIClient;
//! use careerbot_llm_sdk::types::{CompletionRequest, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAIClient::new("your-api-key")?.with_model("gpt-4o-mini");
//!     let response = client
//!         .complete(CompletionRequest {
//!             messages: vec![Message::user("Hello!")],
//!             max_tokens: 256,
//!             model: client.model_name().to_string(),
//!             system: Some("Answer briefly.".to_string()),
//!             temperature: Some(0.2),
//!             top_p: None,
//!             tools: None,
//!             tool_choice: None,
//!         })
//!         .await?;
//!
//!     println!("Response: {}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod openai;
pub mod providers;
pub mod tools;
pub mod types;
