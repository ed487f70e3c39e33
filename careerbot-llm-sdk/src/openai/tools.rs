use super::types::{OpenAIFunction, OpenAIFunctionCall, OpenAITool, OpenAIToolCall};
use crate::tools::{ProviderToolFormat, Tool, ToolCall, ToolChoice};
use serde_json::{json, Value};

/// OpenAI tool format implementation
pub struct OpenAIToolFormat;

impl ProviderToolFormat for OpenAIToolFormat {
    type ProviderTool = OpenAITool;

    fn to_provider_tool(tool: &Tool) -> Self::ProviderTool {
        OpenAITool {
            r#type: "function".to_string(),
            function: OpenAIFunction {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters().clone(),
            },
        }
    }

    fn to_provider_tool_choice(choice: &ToolChoice) -> Value {
        match choice {
            ToolChoice::Auto => json!("auto"),
            ToolChoice::Required => json!("required"),
            ToolChoice::None => json!("none"),
            ToolChoice::Specific { name } => json!({
                "type": "function",
                "function": { "name": name }
            }),
        }
    }
}

impl OpenAIToolFormat {
    /// Encode a unified tool call the way OpenAI expects it in assistant history.
    /// Raw (unparseable) arguments are sent back verbatim.
    pub fn to_provider_tool_call(call: &ToolCall) -> OpenAIToolCall {
        let arguments = match call.arguments() {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        };
        OpenAIToolCall {
            id: call.id().to_string(),
            r#type: "function".to_string(),
            function: OpenAIFunctionCall {
                name: call.name().to_string(),
                arguments,
            },
        }
    }

    /// Decode a provider tool call. Arguments that are not valid JSON are kept
    /// as a raw string so the dispatcher can report them instead of failing the turn.
    pub fn from_provider_tool_call(call: &OpenAIToolCall) -> ToolCall {
        let arguments = if call.function.arguments.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(&call.function.arguments)
                .unwrap_or_else(|_| Value::String(call.function.arguments.clone()))
        };

        ToolCall::new(call.id.clone(), call.function.name.clone(), arguments)
    }
}
