pub mod router;
pub mod schemas;

#[cfg(test)]
mod tests;

use careerbot_llm_sdk::error::LlmError;
use careerbot_llm_sdk::tools::{Tool, ToolCall};
use schemas::{RecordUnknownQuestionParams, RecordUserDetailsParams};

pub use router::ToolRouter;

/// The fixed set of side-effecting actions the model may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerTool {
    RecordUserDetails,
    RecordUnknownQuestion,
}

impl CareerTool {
    pub const ALL: [CareerTool; 2] = [CareerTool::RecordUserDetails, CareerTool::RecordUnknownQuestion];

    /// Returns the tool name as the model sees it
    pub fn name(&self) -> &'static str {
        match self {
            CareerTool::RecordUserDetails => "record_user_details",
            CareerTool::RecordUnknownQuestion => "record_unknown_question",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Tool definition sent to the model
    pub fn to_tool_definition(&self) -> Tool {
        match self {
            CareerTool::RecordUserDetails => Tool::from_type::<RecordUserDetailsParams>()
                .name(self.name())
                .description(
                    "Use ONLY after the user explicitly volunteers their email or requests follow-up contact. \
                     Collects only volunteered information for follow-up purposes with user consent.",
                )
                .build(),
            CareerTool::RecordUnknownQuestion => Tool::from_type::<RecordUnknownQuestionParams>()
                .name(self.name())
                .description(
                    "Use ONLY for career-relevant questions that cannot be answered from the provided \
                     background information. Do not log trivial, off-topic, or non-career questions.",
                )
                .build(),
        }
    }

    /// Parse a model tool call into a typed request
    pub fn parse_tool_call(call: &ToolCall) -> Result<ToolRequest, ToolRequestError> {
        let tool = Self::from_name(call.name())
            .ok_or_else(|| ToolRequestError::Unsupported(call.name().to_string()))?;

        let request = match tool {
            CareerTool::RecordUserDetails => {
                let params: RecordUserDetailsParams =
                    call.parse_arguments().map_err(|e| invalid(tool, e))?;
                require_non_blank(tool, "email", &params.email)?;
                if !params.email.contains('@') {
                    return Err(ToolRequestError::InvalidArguments {
                        tool: tool.name(),
                        detail: format!("`{}` is not an email address", params.email.trim()),
                    });
                }
                ToolRequest::RecordUserDetails(params)
            }
            CareerTool::RecordUnknownQuestion => {
                let params: RecordUnknownQuestionParams =
                    call.parse_arguments().map_err(|e| invalid(tool, e))?;
                require_non_blank(tool, "question", &params.question)?;
                ToolRequest::RecordUnknownQuestion(params)
            }
        };

        Ok(request)
    }
}

/// All tool definitions, in a stable order
pub fn tool_definitions() -> Vec<Tool> {
    CareerTool::ALL
        .iter()
        .map(CareerTool::to_tool_definition)
        .collect()
}

/// A validated tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    RecordUserDetails(RecordUserDetailsParams),
    RecordUnknownQuestion(RecordUnknownQuestionParams),
}

impl ToolRequest {
    /// Text pushed to the profile owner for this request
    pub fn notification_text(&self) -> String {
        match self {
            ToolRequest::RecordUserDetails(params) => format!(
                "Recording interest from {} with email {} and notes {}",
                present_or(&params.name, "Name not provided"),
                params.email.trim(),
                present_or(&params.notes, "not provided"),
            ),
            ToolRequest::RecordUnknownQuestion(params) => format!(
                "Recording {} asked that I couldn't answer",
                params.question.trim()
            ),
        }
    }
}

/// Problems with a tool call that are reported back to the model, never to the user
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ToolRequestError {
    #[error("unsupported tool: {0}")]
    Unsupported(String),

    #[error("invalid arguments for {tool}: {detail}")]
    InvalidArguments { tool: &'static str, detail: String },
}

fn invalid(tool: CareerTool, error: LlmError) -> ToolRequestError {
    let detail = match error {
        LlmError::ToolArgumentParse { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    ToolRequestError::InvalidArguments {
        tool: tool.name(),
        detail,
    }
}

fn require_non_blank(
    tool: CareerTool,
    field: &'static str,
    value: &str,
) -> Result<(), ToolRequestError> {
    if value.trim().is_empty() {
        return Err(ToolRequestError::InvalidArguments {
            tool: tool.name(),
            detail: format!("missing field `{}`", field),
        });
    }
    Ok(())
}

fn present_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}
