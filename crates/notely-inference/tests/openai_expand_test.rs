//! Wiremock tests for the OpenAI-compatible expansion backend.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notely_core::{Error, ExpansionBackend};
use notely_inference::{OpenAIBackend, OpenAIConfig};

fn backend_for(server: &MockServer) -> OpenAIBackend {
    OpenAIBackend::new(OpenAIConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        model: "gpt-4o-mini".to_string(),
        timeout_seconds: 5,
    })
    .expect("backend creation should succeed")
}

#[tokio::test]
async fn test_expand_happy_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.7,
            "max_tokens": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "A detailed essay."}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let expanded = backend
        .expand("buy milk", Some("Groceries"))
        .await
        .expect("expansion should succeed");
    assert_eq!(expanded, "A detailed essay.");
}

#[tokio::test]
async fn test_expand_sends_system_and_user_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system"},
                {"role": "user"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "ok"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    backend.expand("note body", None).await.unwrap();
}

#[tokio::test]
async fn test_expand_uses_title_when_content_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "from title"}}
            ]
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let expanded = backend.expand("", Some("Vacation plans")).await.unwrap();
    assert_eq!(expanded, "from title");

    // The user prompt must carry the title text.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user_content = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_content.contains("Vacation plans"));
}

#[tokio::test]
async fn test_expand_provider_error_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "Rate limit exceeded",
                "type": "rate_limit_error",
                "code": null
            }
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let result = backend.expand("note", None).await;
    match result {
        Err(Error::Inference(msg)) => {
            assert!(msg.contains("429"));
            assert!(msg.contains("Rate limit exceeded"));
        }
        other => panic!("Expected inference error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_expand_unparseable_error_body_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let result = backend.expand("note", None).await;
    match result {
        Err(Error::Inference(msg)) => assert!(msg.contains("Unknown error")),
        other => panic!("Expected inference error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_expand_empty_choices_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let result = backend.expand("note", None).await;
    assert!(matches!(result, Err(Error::Inference(_))));
}
