//! Integration tests for POST /chat
//!
//! Drives the full router (middleware included) with a stub provider so no
//! network access is needed.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use gemini_relay::{
    config::Config,
    handlers::{self, AppState},
    middleware::REQUEST_ID_HEADER,
    provider::{GenerationProvider, GenerationRequest, ProviderError},
    settings::{GEMINI_API_KEY, Resolver, StaticSource},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct StubProvider {
    reply: Result<String, ProviderError>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl GenerationProvider for StubProvider {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        self.reply.clone()
    }
}

fn stub(reply: Result<String, ProviderError>) -> Arc<StubProvider> {
    Arc::new(StubProvider {
        reply,
        prompts: Mutex::new(Vec::new()),
    })
}

fn create_test_app(api_key: Option<&str>, provider: Arc<StubProvider>) -> Router {
    let pairs: Vec<(&str, &str)> = api_key.map(|k| (GEMINI_API_KEY, k)).into_iter().collect();
    let resolver = Resolver::new(vec![Box::new(StaticSource::new(pairs))]);
    handlers::app(AppState::with_parts(
        Arc::new(Config::default()),
        resolver,
        provider,
    ))
}

fn post_chat(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).expect("response should be JSON");
    (status, json)
}

#[tokio::test]
async fn test_chat_success() {
    let provider = stub(Ok("Test response from LLM".to_string()));
    let app = create_test_app(Some("test_api_key"), provider.clone());

    let (status, body) = send(app, post_chat(r#"{"prompt": "Hello, test prompt"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"response": "Test response from LLM", "success": true})
    );
    assert_eq!(*provider.prompts.lock().unwrap(), vec!["Hello, test prompt"]);
}

#[tokio::test]
async fn test_chat_empty_prompt() {
    let app = create_test_app(Some("k"), stub(Ok("unused".to_string())));
    let (status, body) = send(app, post_chat(r#"{"prompt": ""}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Prompt is required"}));
}

#[tokio::test]
async fn test_chat_no_prompt_field() {
    let app = create_test_app(Some("k"), stub(Ok("unused".to_string())));
    let (status, body) = send(app, post_chat("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Prompt is required"}));
}

#[tokio::test]
async fn test_chat_missing_api_key() {
    let provider = stub(Ok("unused".to_string()));
    let app = create_test_app(None, provider.clone());

    let (status, body) = send(app, post_chat(r#"{"prompt": "Test prompt"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Gemini API key not configured"}));
    assert!(provider.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_invalid_json() {
    let app = create_test_app(Some("k"), stub(Ok("unused".to_string())));
    let (status, body) = send(app, post_chat("invalid json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON in request"}));
}

#[tokio::test]
async fn test_chat_provider_error() {
    let app = create_test_app(
        Some("k"),
        stub(Err(ProviderError::Rejected {
            status: 500,
            message: "API Error".to_string(),
        })),
    );

    let (status, body) = send(app, post_chat(r#"{"prompt": "Test prompt"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Error generating response: API Error"}));
}

#[tokio::test]
async fn test_chat_unreachable_provider_uses_same_message_shape() {
    let app = create_test_app(
        Some("k"),
        stub(Err(ProviderError::Unreachable("connection refused".to_string()))),
    );

    let (status, body) = send(app, post_chat(r#"{"prompt": "Test prompt"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Error generating response: connection refused"})
    );
}

#[tokio::test]
async fn test_chat_ignores_content_type() {
    let app = create_test_app(Some("k"), stub(Ok("ok".to_string())));
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"prompt": "hi"}"#))
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "ok");
}

#[tokio::test]
async fn test_chat_trailing_slash_route() {
    let app = create_test_app(Some("k"), stub(Ok("ok".to_string())));
    let request = Request::builder()
        .method("POST")
        .uri("/chat/")
        .body(Body::from(r#"{"prompt": "hi"}"#))
        .unwrap();

    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_chat_rejects_get_method() {
    let app = create_test_app(Some("k"), stub(Ok("ok".to_string())));
    let request = Request::builder()
        .method("GET")
        .uri("/chat")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_chat_rejects_put_method() {
    let app = create_test_app(Some("k"), stub(Ok("ok".to_string())));
    let request = Request::builder()
        .method("PUT")
        .uri("/chat/")
        .body(Body::from(r#"{"prompt": "hi"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = create_test_app(Some("k"), stub(Ok("ok".to_string())));
    let ok = app
        .clone()
        .oneshot(post_chat(r#"{"prompt": "hi"}"#))
        .await
        .unwrap();
    assert!(ok.headers().contains_key(REQUEST_ID_HEADER));

    let err = app.oneshot(post_chat("invalid json")).await.unwrap();
    assert!(err.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_client_supplied_request_id_is_echoed() {
    let app = create_test_app(Some("k"), stub(Ok("ok".to_string())));
    let id = "6f1c1a52-8a0e-4c1f-9f2a-2f6a7d8b9c01";
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(REQUEST_ID_HEADER, id)
        .body(Body::from(r#"{"prompt": "hi"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], id);
}

#[tokio::test]
async fn test_oversized_body_gets_json_error() {
    let provider = stub(Ok("unused".to_string()));
    let app = create_test_app(Some("k"), provider.clone());
    // Past axum's default 2 MB body limit
    let body = format!(r#"{{"prompt": "{}"}}"#, "a".repeat(3_000_000));

    let (status, json) = send(app, post_chat(&body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let message = json["error"].as_str().expect("error should be a string");
    assert!(message.contains("length limit"), "got: {message}");
    assert_eq!(json.as_object().unwrap().len(), 1);
    assert!(provider.prompts.lock().unwrap().is_empty());
}
