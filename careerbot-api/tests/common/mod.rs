use actix_web::{test, web, App};
use careerbot_agent::{ChatOrchestrator, ChatSettings, KnowledgeStore, Notifier, ToolRouter};
use careerbot_llm_sdk::client::LlmClient;
use careerbot_llm_sdk::error::LlmError;
use careerbot_llm_sdk::tools::ToolCall;
use careerbot_llm_sdk::types::{CompletionRequest, CompletionResponse, ContentBlock, Role, Usage};
use std::sync::{Arc, Mutex};

pub struct TestApp<S> {
    pub mock_llm_client: Arc<MockLlmClient>,
    pub notifier: Arc<RecordingNotifier>,
    pub app: S,
}

pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<Result<CompletionResponse, LlmError>>>>,
    pub call_count: Arc<Mutex<usize>>,
}

impl MockLlmClient {
    pub fn with_responses(responses: Vec<Result<CompletionResponse, LlmError>>) -> Self {
        MockLlmClient {
            responses: Arc::new(Mutex::new(responses)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(create_completion_response_with_text("I'm not sure."))
        } else {
            responses.remove(0)
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) {
        self.sent.lock().unwrap().push(text.to_string());
    }
}

pub async fn setup_test_app(
    responses: Vec<Result<CompletionResponse, LlmError>>,
) -> TestApp<
    impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
> {
    let mock_llm_client = Arc::new(MockLlmClient::with_responses(responses));
    let notifier = Arc::new(RecordingNotifier::default());

    let orchestrator = Arc::new(ChatOrchestrator::new(
        mock_llm_client.clone() as Arc<dyn LlmClient>,
        Arc::new(ToolRouter::new(notifier.clone())),
        &KnowledgeStore::from_text("### Background\nBuilt search infrastructure at a startup."),
        ChatSettings::default(),
    ));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator))
            .configure(careerbot_api::configure),
    )
    .await;

    TestApp {
        mock_llm_client,
        notifier,
        app,
    }
}

pub fn create_completion_response_with_tool_call(
    tool_name: &str,
    tool_args: serde_json::Value,
) -> CompletionResponse {
    CompletionResponse {
        content: vec![],
        role: Role::Assistant,
        usage: Usage {
            input_tokens: 10,
            output_tokens: 20,
        },
        stop_reason: Some("tool_calls".to_string()),
        tool_calls: Some(vec![ToolCall::new(
            "call_123".to_string(),
            tool_name.to_string(),
            tool_args,
        )]),
    }
}

pub fn create_completion_response_with_text(text: &str) -> CompletionResponse {
    CompletionResponse {
        content: vec![ContentBlock::Text {
            text: text.to_string(),
        }],
        role: Role::Assistant,
        usage: Usage {
            input_tokens: 10,
            output_tokens: 20,
        },
        stop_reason: Some("stop".to_string()),
        tool_calls: None,
    }
}
