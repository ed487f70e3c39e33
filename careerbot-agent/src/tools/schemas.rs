use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Contact details a visitor volunteered for follow-up (a lead)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecordUserDetailsParams {
    /// The email address the user explicitly provided
    pub email: String,
    /// The user's name, if they provided it
    #[serde(default)]
    pub name: Option<String>,
    /// Any additional information about the conversation that's worth recording to give context
    #[serde(default)]
    pub notes: Option<String>,
}

/// A career question the background material could not answer (a knowledge gap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RecordUnknownQuestionParams {
    /// The career-relevant question that couldn't be answered from the background information
    pub question: String,
}
