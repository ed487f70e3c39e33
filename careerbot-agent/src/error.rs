use careerbot_llm_sdk::error::LlmError;

/// Failures that abort a conversation turn.
///
/// Tool problems are never surfaced here; they are reported back to the model
/// as tool results and the turn continues.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("language model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model kept requesting tools after {limit} rounds")]
    ToolLoopLimit { limit: u32 },
}
