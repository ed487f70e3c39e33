//! Model constants for the supported provider

/// OpenAI model constants
pub mod openai {
    /// GPT-4o Mini - small, fast and cheap; the default for visitor chat
    pub const GPT_4O_MINI_ID: &str = "gpt-4o-mini";
}
