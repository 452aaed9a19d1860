use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::services::InMemoryAuthState;
use shared_models::auth::AuthStateProvider;
use shared_utils::extractor::AuthContext;
use shared_utils::test_utils::{JwtTestUtils, MockGeminiResponses, TestConfig, TestUser};
use symptom_checker_cell::api::SymptomCheckerService;
use symptom_checker_cell::symptom_checker_routes;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
const APOLOGY: &str =
    "I'm sorry, but I encountered an error while analyzing your symptoms. Please try again later.";

struct TestApp {
    router: Router,
    provider: Arc<InMemoryAuthState>,
    config: TestConfig,
}

impl TestApp {
    fn new(mock_server: &MockServer) -> Self {
        let config = TestConfig::default().with_gemini_base_url(&mock_server.uri());
        let provider = Arc::new(InMemoryAuthState::new());
        let auth = AuthContext::new(config.to_arc(), provider.clone());
        let service = Arc::new(SymptomCheckerService::from_config(&config.to_app_config()));

        Self { router: symptom_checker_routes(service, auth), provider, config }
    }

    async fn login(&self, user: &TestUser) -> String {
        self.provider.init(user.to_user()).await;
        JwtTestUtils::create_test_token(user, &self.config.jwt_secret, None)
    }

    async fn call(&self, method: &str, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(self.router.clone(), method, uri, token, body).await
    }
}

async fn send(router: Router, method: &str, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token));

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

async fn mount_reply(mock_server: &MockServer, payload: Value) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-gemini-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_routes_require_authentication() {
    let mock_server = MockServer::start().await;
    let app = TestApp::new(&mock_server);

    let request = Request::builder()
        .method("POST")
        .uri("/sessions")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_conversation_round_trip() {
    let mock_server = MockServer::start().await;
    mount_reply(
        &mock_server,
        MockGeminiResponses::text_response("I can help with that.\n\n* How long?\n* Any fever?"),
    )
    .await;

    let app = TestApp::new(&mock_server);
    let token = app.login(&TestUser::default()).await;

    let (status, session) = app.call("POST", "/sessions", &token, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["mode"], "conversational");
    assert_eq!(session["state"], "idle");
    let id = session["id"].as_str().unwrap().to_string();

    let (status, view) = app
        .call("POST", &format!("/sessions/{}/messages", id), &token, Some(json!({ "text": "I have a cough" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["thinking"], false);

    let messages = view["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");

    let blocks = messages[1]["body"]["blocks"].as_array().unwrap();
    assert_eq!(blocks[0], json!({ "type": "paragraph", "text": "I can help with that." }));
    assert_eq!(blocks[1], json!({ "type": "list", "items": ["How long?", "Any fever?"] }));
}

#[tokio::test]
async fn test_structured_session_renders_analysis_card() {
    let mock_server = MockServer::start().await;
    mount_reply(
        &mock_server,
        MockGeminiResponses::analysis_response(&["Rest", "Hydrate"], true, "high", "Not medical advice."),
    )
    .await;

    let app = TestApp::new(&mock_server);
    let token = app.login(&TestUser::default()).await;

    let (_, session) = app
        .call("POST", "/sessions", &token, Some(json!({ "mode": "structured" })))
        .await;
    assert_eq!(session["mode"], "structured");
    let id = session["id"].as_str().unwrap().to_string();

    let (status, view) = app
        .call(
            "POST",
            &format!("/sessions/{}/messages", id),
            &token,
            Some(json!({ "text": "sharp chest pain since this morning" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let card = &view["messages"][1]["body"]["card"];
    assert_eq!(view["messages"][1]["body"]["type"], "analysis");
    assert_eq!(card["urgency"], json!({ "label": "HIGH", "variant": "destructive" }));
    assert_eq!(
        card["seek_help_warning"],
        "Based on your symptoms, it is recommended to seek professional medical attention."
    );
    assert_eq!(card["recommendations"], json!(["Rest", "Hydrate"]));
    assert_eq!(card["disclaimer"], "Not medical advice.");
}

#[tokio::test]
async fn test_structured_session_rejects_short_input() {
    let mock_server = MockServer::start().await;
    let app = TestApp::new(&mock_server);
    let token = app.login(&TestUser::default()).await;

    let (_, session) = app
        .call("POST", "/sessions", &token, Some(json!({ "mode": "structured" })))
        .await;
    let id = session["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .call("POST", &format!("/sessions/{}/messages", id), &token, Some(json!({ "text": "cough" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please describe your symptoms in at least 10 characters.");

    let (_, view) = app.call("GET", &format!("/sessions/{}", id), &token, None).await;
    assert_eq!(view["messages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_backend_error_becomes_apology_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(MockGeminiResponses::error_response("Internal error", 500)),
        )
        .mount(&mock_server)
        .await;

    let app = TestApp::new(&mock_server);
    let token = app.login(&TestUser::default()).await;

    let (_, session) = app.call("POST", "/sessions", &token, None).await;
    let id = session["id"].as_str().unwrap().to_string();

    let (status, view) = app
        .call("POST", &format!("/sessions/{}/messages", id), &token, Some(json!({ "text": "headache" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "idle");
    assert_eq!(view["messages"][1]["body"], json!({ "type": "error", "message": APOLOGY }));
}

#[tokio::test]
async fn test_sessions_are_private_and_can_be_ended() {
    let mock_server = MockServer::start().await;
    let app = TestApp::new(&mock_server);
    let owner_token = app.login(&TestUser::patient("owner@example.com")).await;
    let other_token = app.login(&TestUser::patient("other@example.com")).await;

    let (_, session) = app.call("POST", "/sessions", &owner_token, None).await;
    let uri = format!("/sessions/{}", session["id"].as_str().unwrap());

    let (status, _) = app.call("GET", &uri, &other_token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.call("DELETE", &uri, &owner_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = app.call("GET", &uri, &owner_token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_endpoint() {
    let mock_server = MockServer::start().await;
    mount_reply(
        &mock_server,
        MockGeminiResponses::analysis_response(&["Monitor your temperature"], false, "low", "Not medical advice."),
    )
    .await;

    let app = TestApp::new(&mock_server);
    let token = app.login(&TestUser::default()).await;

    let (status, body) = app
        .call("POST", "/analyze", &token, Some(json!({ "symptoms": "mild fever since yesterday" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symptoms"], "mild fever since yesterday");
    assert_eq!(body["analysis"]["urgency"]["variant"], "secondary");
    assert!(body["analysis"].get("seek_help_warning").is_none());
}

#[tokio::test]
async fn test_analyze_endpoint_reports_failure() {
    let mock_server = MockServer::start().await;
    mount_reply(&mock_server, MockGeminiResponses::text_response("Just rest.")).await;

    let app = TestApp::new(&mock_server);
    let token = app.login(&TestUser::default()).await;

    let (status, body) = app
        .call("POST", "/analyze", &token, Some(json!({ "symptoms": "mild fever since yesterday" })))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["error"],
        "An error occurred while analyzing your symptoms. Please try again later."
    );
}

#[tokio::test]
async fn test_submit_while_reply_pending_is_conflict() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockGeminiResponses::text_response("How long have you had it?"))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = TestApp::new(&mock_server);
    let token = app.login(&TestUser::default()).await;

    let (_, session) = app.call("POST", "/sessions", &token, None).await;
    let uri = format!("/sessions/{}", session["id"].as_str().unwrap());
    let messages_uri = format!("{}/messages", uri);

    let first = {
        let router = app.router.clone();
        let token = token.clone();
        let messages_uri = messages_uri.clone();
        tokio::spawn(async move {
            send(router, "POST", &messages_uri, &token, Some(json!({ "text": "I have a cough" }))).await
        })
    };

    let mut pending = Value::Null;
    for _ in 0..100 {
        let (_, view) = app.call("GET", &uri, &token, None).await;
        if view["thinking"] == true {
            pending = view;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(pending["state"], "awaiting_reply");
    assert_eq!(pending["messages"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .call("POST", &messages_uri, &token, Some(json!({ "text": "and a fever" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A reply is still pending for this session.");

    let (_, view) = app.call("GET", &uri, &token, None).await;
    assert_eq!(view["messages"].as_array().unwrap().len(), 1);

    let (status, view) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "idle");
    assert_eq!(view["messages"].as_array().unwrap().len(), 2);
    assert_eq!(view["messages"][0]["body"]["blocks"][0]["text"], "I have a cough");
}
