use async_trait::async_trait;
use solace_core::{
    AiResponse, CompletionProvider, CompletionRequest, Result, SolaceError, SupportPipeline,
};
use solace_interaction::chat_endpoint::{STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR, STATUS_OK};
use solace_interaction::{ChatEndpoint, ChatErrorPayload};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CannedProvider {
    reply: Result<String>,
    calls: AtomicUsize,
}

impl CannedProvider {
    fn new(reply: Result<String>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn endpoint_with(provider: Arc<CannedProvider>) -> ChatEndpoint {
    ChatEndpoint::new(SupportPipeline::bundled().unwrap(), Some(provider))
}

fn body(message: &str) -> String {
    serde_json::json!({ "message": message, "conversationHistory": [] }).to_string()
}

#[tokio::test]
async fn test_crisis_bypasses_provider() {
    let provider = CannedProvider::new(Ok("provider text".into()));
    let endpoint = endpoint_with(provider.clone());

    let reply = endpoint.handle_json(&body("I just want to end it all")).await;

    assert_eq!(reply.status, STATUS_OK);
    let response: AiResponse = serde_json::from_str(&reply.body).unwrap();
    assert!(response.requires_crisis_support);
    assert_eq!(
        response.suggested_actions,
        vec!["Get crisis support now", "Talk to a professional", "I'm in immediate danger"]
    );
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_success_body_uses_camel_case() {
    let endpoint = endpoint_with(CannedProvider::new(Ok("I hear you.".into())));

    let reply = endpoint.handle_json(&body("I'm so worried about tomorrow")).await;

    assert_eq!(reply.status, STATUS_OK);
    let value: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(value["text"], "I hear you.");
    assert_eq!(value["requiresCrisisSupport"], false);
    assert_eq!(value["suggestedActions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_malformed_request_is_400() {
    let endpoint = endpoint_with(CannedProvider::new(Ok("unused".into())));

    let reply = endpoint.handle_json(r#"{"conversationHistory": []}"#).await;

    assert_eq!(reply.status, STATUS_BAD_REQUEST);
    let payload: ChatErrorPayload = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(payload.error, "Invalid request");
}

#[tokio::test]
async fn test_provider_failure_is_500() {
    let provider = CannedProvider::new(Err(SolaceError::provider(
        Some(429),
        "Rate limit reached",
        true,
    )));
    let endpoint = endpoint_with(provider);

    let reply = endpoint.handle_json(&body("I feel sad")).await;

    assert_eq!(reply.status, STATUS_INTERNAL_ERROR);
    let payload: ChatErrorPayload = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(payload.error, "Failed to generate AI response");
    assert!(payload.details.contains("Rate limit reached"));
}

#[tokio::test]
async fn test_endpoint_and_local_path_agree() {
    let pipeline = SupportPipeline::bundled().unwrap();
    let endpoint = ChatEndpoint::new(
        pipeline.clone(),
        Some(CannedProvider::new(Ok("ok".into())) as Arc<dyn CompletionProvider>),
    );

    let utterances = [
        "I feel anxious and overwhelmed",
        "I want to kill myself",
        "My dad died and I'm so sad",
        "I'm furious and stressed about work",
        "I went to the store today",
        "Everything feels hopeless",
        "",
    ];

    for utterance in utterances {
        let local = pipeline.respond(utterance, &[]).unwrap();
        let request = solace_interaction::ChatRequest {
            message: utterance.to_string(),
            conversation_history: Vec::new(),
        };
        let remote = endpoint.handle(request).await.unwrap();

        assert_eq!(
            local.requires_crisis_support, remote.requires_crisis_support,
            "gate differs for {utterance:?}"
        );
        assert_eq!(
            local.suggested_actions, remote.suggested_actions,
            "actions differ for {utterance:?}"
        );
    }
}

#[tokio::test]
async fn test_template_mode_without_provider() {
    let pipeline = SupportPipeline::bundled().unwrap();
    let endpoint = ChatEndpoint::new(pipeline.clone(), None);

    let reply = endpoint.handle_json(&body("hello")).await;

    assert_eq!(reply.status, STATUS_OK);
    let response: AiResponse = serde_json::from_str(&reply.body).unwrap();
    assert!(pipeline.catalog().responses.greeting.contains(&response.text));
}

#[tokio::test]
async fn test_crisis_answered_when_provider_unavailable() {
    let endpoint = ChatEndpoint::remote(
        SupportPipeline::bundled().unwrap(),
        Err(SolaceError::config("OPENAI_API_KEY not found")),
    );

    let crisis = endpoint.handle_json(&body("I want to kill myself")).await;
    assert_eq!(crisis.status, STATUS_OK);
    let response: AiResponse = serde_json::from_str(&crisis.body).unwrap();
    assert!(response.requires_crisis_support);
    assert_eq!(response, endpoint.pipeline().crisis_response());

    let ordinary = endpoint.handle_json(&body("I feel sad")).await;
    assert_eq!(ordinary.status, STATUS_INTERNAL_ERROR);
    let payload: ChatErrorPayload = serde_json::from_str(&ordinary.body).unwrap();
    assert!(payload.details.contains("OPENAI_API_KEY"));
}
