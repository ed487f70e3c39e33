use super::{tool_definitions, CareerTool};
use crate::notifier::Notifier;
use careerbot_llm_sdk::tools::{Tool, ToolCall, ToolResult};
use serde_json::json;
use std::sync::Arc;

/// Maps tool calls requested by the model onto notifications.
///
/// Dispatch never fails: anything wrong with a call becomes an `{"error": ...}`
/// result for the model to read.
pub struct ToolRouter {
    notifier: Arc<dyn Notifier>,
}

impl ToolRouter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Definitions of every routable tool, for the completion request
    pub fn definitions(&self) -> Vec<Tool> {
        tool_definitions()
    }

    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        tracing::info!(tool_name = %call.name(), tool_id = %call.id(), "Tool called");

        let content = match CareerTool::parse_tool_call(call) {
            Ok(request) => {
                self.notifier.send(&request.notification_text()).await;
                json!({ "recorded": "ok" })
            }
            Err(e) => {
                tracing::warn!(tool_name = %call.name(), error = %e, "Rejected tool call");
                json!({ "error": e.to_string() })
            }
        };

        ToolResult::text(call.id(), content.to_string())
    }
}
