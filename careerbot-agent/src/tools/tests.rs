use super::*;
use crate::test_support::{tool_call, RecordingNotifier};
use serde_json::{json, Value};
use std::sync::Arc;

fn router() -> (ToolRouter, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (ToolRouter::new(notifier.clone()), notifier)
}

fn content_json(result: &careerbot_llm_sdk::tools::ToolResult) -> Value {
    serde_json::from_str(result.content()).unwrap()
}

#[test]
fn test_tool_names_round_trip() {
    for tool in CareerTool::ALL {
        assert_eq!(CareerTool::from_name(tool.name()), Some(tool));
    }
    assert_eq!(CareerTool::from_name("delete_everything"), None);
}

#[test]
fn test_definitions_expose_both_tools() {
    let definitions = tool_definitions();
    let names: Vec<&str> = definitions.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["record_user_details", "record_unknown_question"]);

    let schema = serde_json::to_value(definitions[0].parameters()).unwrap();
    let required = schema["required"].as_array().unwrap();
    assert_eq!(required, &vec![json!("email")]);
    assert!(schema["properties"]["name"].is_object());
    assert!(schema["properties"]["notes"].is_object());
    assert_eq!(schema["additionalProperties"], json!(false));
}

#[tokio::test]
async fn test_record_user_details_notifies_once() {
    let (router, notifier) = router();
    let call = tool_call(
        "call_1",
        "record_user_details",
        json!({"email": "a@b.com", "name": "Ada"}),
    );

    let result = router.dispatch(&call).await;

    assert_eq!(result.tool_call_id(), "call_1");
    assert_eq!(content_json(&result), json!({"recorded": "ok"}));
    assert_eq!(
        notifier.sent(),
        vec!["Recording interest from Ada with email a@b.com and notes not provided"]
    );
}

#[tokio::test]
async fn test_record_user_details_defaults_missing_name() {
    let (router, notifier) = router();
    let call = tool_call(
        "call_1",
        "record_user_details",
        json!({"email": "a@b.com", "notes": "Hiring for a staff role"}),
    );

    router.dispatch(&call).await;

    assert_eq!(
        notifier.sent(),
        vec!["Recording interest from Name not provided with email a@b.com and notes Hiring for a staff role"]
    );
}

#[tokio::test]
async fn test_record_unknown_question_notifies_once() {
    let (router, notifier) = router();
    let call = tool_call(
        "call_9",
        "record_unknown_question",
        json!({"question": "Did you ever work with Erlang?"}),
    );

    let result = router.dispatch(&call).await;

    assert_eq!(content_json(&result), json!({"recorded": "ok"}));
    assert_eq!(
        notifier.sent(),
        vec!["Recording Did you ever work with Erlang? asked that I couldn't answer"]
    );
}

#[tokio::test]
async fn test_unknown_tool_is_reported_without_notifying() {
    let (router, notifier) = router();
    let call = tool_call("call_x", "delete_everything", json!({}));

    let result = router.dispatch(&call).await;

    assert_eq!(result.tool_call_id(), "call_x");
    assert_eq!(
        content_json(&result),
        json!({"error": "unsupported tool: delete_everything"})
    );
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_missing_required_field_is_reported() {
    let (router, notifier) = router();
    let call = tool_call("call_2", "record_user_details", json!({"name": "Ada"}));

    let result = router.dispatch(&call).await;
    let error = content_json(&result)["error"].as_str().unwrap().to_string();

    assert!(error.starts_with("invalid arguments for record_user_details:"));
    assert!(error.contains("email"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_blank_required_field_counts_as_missing() {
    let (router, notifier) = router();
    let call = tool_call("call_3", "record_unknown_question", json!({"question": "   "}));

    let result = router.dispatch(&call).await;

    assert_eq!(
        content_json(&result),
        json!({"error": "invalid arguments for record_unknown_question: missing field `question`"})
    );
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_unparseable_arguments_are_reported() {
    let (router, notifier) = router();
    // Arguments the model sent as broken JSON are kept as a raw string
    let call = tool_call(
        "call_4",
        "record_user_details",
        Value::String("{\"email\": ".to_string()),
    );

    let result = router.dispatch(&call).await;
    let error = content_json(&result)["error"].as_str().unwrap().to_string();

    assert!(error.starts_with("invalid arguments for record_user_details:"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_extra_fields_are_rejected() {
    let (router, notifier) = router();
    let call = tool_call(
        "call_5",
        "record_unknown_question",
        json!({"question": "Erlang?", "priority": "high"}),
    );

    let result = router.dispatch(&call).await;
    let error = content_json(&result)["error"].as_str().unwrap().to_string();

    assert!(error.contains("priority"));
    assert!(notifier.sent().is_empty());
}

#[test]
fn test_email_without_at_sign_is_rejected() {
    let call = tool_call("call_6", "record_user_details", json!({"email": "ada"}));

    let error = CareerTool::parse_tool_call(&call).unwrap_err();

    assert_eq!(
        error.to_string(),
        "invalid arguments for record_user_details: `ada` is not an email address"
    );
}
