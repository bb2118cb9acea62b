//! Functional tests for the Gemini client against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use virtual_wardrobe::backend::{GeminiBackend, GenerationGateway};
use virtual_wardrobe::config::GeminiConfig;
use virtual_wardrobe::error::GenerationError;
use virtual_wardrobe::ingest::{self, ImageRecord, RawFile};

const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn backend(server: &MockServer) -> GeminiBackend {
    GeminiBackend::new(&GeminiConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        model: "test-model".to_string(),
        timeout_ms: None,
    })
    .unwrap()
}

async fn images() -> (ImageRecord, ImageRecord) {
    let face = ingest::ingest(RawFile::from_bytes("face.jpg", "image/jpeg", vec![1, 2, 3]))
        .await
        .unwrap();
    let garment = ingest::ingest(RawFile::from_bytes("shirt.png", "image/png", vec![4, 5]))
        .await
        .unwrap();
    (face, garment)
}

#[tokio::test]
async fn test_sends_images_prompt_and_modalities() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": "AQID" } },
                    { "inlineData": { "mimeType": "image/png", "data": "BAU=" } },
                    { "text": "dress them up" }
                ]
            }],
            "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is the image" },
                        { "inlineData": { "mimeType": "image/png", "data": "CQk=" } }
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (face, garment) = images().await;
    let result = backend(&server)
        .generate(&face, &garment, "dress them up")
        .await;

    assert_eq!(result, Ok("data:image/png;base64,CQk=".to_string()));
}

#[tokio::test]
async fn test_blocked_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [] },
                "safetyRatings": [
                    { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "probability": "HIGH", "blocked": true }
                ]
            }]
        })))
        .mount(&server)
        .await;

    let (face, garment) = images().await;
    let result = backend(&server).generate(&face, &garment, "prompt").await;

    assert_eq!(result, Err(GenerationError::Blocked));
}

#[tokio::test]
async fn test_text_only_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't do that" }] } }]
        })))
        .mount(&server)
        .await;

    let (face, garment) = images().await;
    let result = backend(&server).generate(&face, &garment, "prompt").await;

    assert_eq!(result, Err(GenerationError::NoImageReturned));
}

#[tokio::test]
async fn test_error_status_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("quota exhausted"))
        .expect(1)
        .mount(&server)
        .await;

    let (face, garment) = images().await;
    let result = backend(&server).generate(&face, &garment, "prompt").await;

    match result {
        Err(GenerationError::ServiceError(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("quota exhausted"));
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (face, garment) = images().await;
    let result = backend(&server).generate(&face, &garment, "prompt").await;

    assert!(matches!(result, Err(GenerationError::ServiceError(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_service_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let backend = GeminiBackend::new(&GeminiConfig {
        api_key: Some("test-key".to_string()),
        base_url: uri,
        model: "test-model".to_string(),
        timeout_ms: Some(2000),
    })
    .unwrap();

    let (face, garment) = images().await;
    let result = backend.generate(&face, &garment, "prompt").await;

    assert!(matches!(result, Err(GenerationError::ServiceError(_))));
}

#[tokio::test]
async fn test_identical_calls_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "CQk=" } }
            ] } }]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let (face, garment) = images().await;
    let backend = backend(&server);
    backend.generate(&face, &garment, "prompt").await.unwrap();
    backend.generate(&face, &garment, "prompt").await.unwrap();
}

#[test]
fn test_missing_api_key_is_rejected() {
    let config = GeminiConfig::default();
    assert!(GeminiBackend::new(&config).is_err());
}
