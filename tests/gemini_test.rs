use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;
use tokio::net::TcpListener;

use oracle::consts::AI_ERROR_MESSAGE;
use oracle::generator::gemini::GeminiGenerator;
use oracle::generator::{GenerateError, Generator};
use oracle::web::{self, AppState, page::Page};

const PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn generator_for(server: &mockito::ServerGuard) -> GeminiGenerator {
    GeminiGenerator::new("test-key", None, Some(server.url().as_str()))
}

#[tokio::test]
async fn sends_prompt_and_returns_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Please answer the following question: What is 2+2?"}]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "candidates": [{"content": {"parts": [{"text": "4"}], "role": "model"}, "finishReason": "STOP"}],
                "usageMetadata": {"promptTokenCount": 9, "candidatesTokenCount": 1, "totalTokenCount": 10}
            }"#,
        )
        .create_async()
        .await;

    let text = generator_for(&server)
        .generate("Please answer the following question: What is 2+2?")
        .await
        .unwrap();

    assert_eq!(text, "4");
    mock.assert_async().await;
}

#[tokio::test]
async fn configured_model_is_in_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "hi"}]}}]}"#)
        .create_async()
        .await;

    let generator =
        GeminiGenerator::new("test-key", Some("gemini-2.0-flash".into()), Some(server.url().as_str()));
    assert_eq!(generator.generate("hello").await.unwrap(), "hi");
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_is_reported_with_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(400)
        .with_body(r#"{"error": {"message": "API key not valid"}}"#)
        .create_async()
        .await;

    let err = generator_for(&server).generate("hello").await.unwrap_err();
    match err {
        GenerateError::Status { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = generator_for(&server).generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerateError::Decode(_)));
}

#[tokio::test]
async fn blocked_prompt_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .create_async()
        .await;

    let err = generator_for(&server).generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerateError::Blocked(reason) if reason == "SAFETY"));
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    // Grab a free port, then release it so nothing is listening there.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let generator = GeminiGenerator::new("test-key", None, Some(format!("http://{addr}").as_str()));

    let err = generator.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerateError::Transport(_)));
}

#[tokio::test]
async fn api_failure_reaches_the_page_as_fixed_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(500)
        .with_body("internal stack trace: do not show")
        .create_async()
        .await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(Arc::new(generator_for(&server)), Page::embedded().unwrap());
    tokio::spawn(web::serve(listener, state, std::future::pending()));

    let html = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("task=question&user_input=hi")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains(&format!("<pre id=\"response\">{AI_ERROR_MESSAGE}</pre>")));
    assert!(!html.contains("stack trace"));
}
