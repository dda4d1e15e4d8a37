use std::fs;

use pdfqa_tui::{ApiClient, ApiError, AskPayload, ModelDescriptor, Settings};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let settings = Settings {
        server_url: format!("{}/", server.uri()),
        ..Settings::default()
    };
    ApiClient::new(&settings).expect("client")
}

#[tokio::test]
async fn list_models_keeps_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "a"},
            {"name": "b", "digest": "ignored"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let models = client_for(&server).list_models().await.expect("models");
    assert_eq!(models, vec![ModelDescriptor::new("a"), ModelDescriptor::new("b")]);
}

#[tokio::test]
async fn list_models_rejects_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_models().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn list_models_reports_bare_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).list_models().await.unwrap_err();
    assert!(matches!(err, ApiError::Status(503)), "got {:?}", err);
    assert_eq!(err.user_message(), "server responded with HTTP 503");
}

#[tokio::test]
async fn upload_sends_file_field_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"manual.pdf\""))
        .and(body_string_contains("%PDF-1.4 fake body"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "PDF ingested successfully!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("manual.pdf");
    fs::write(&file, "%PDF-1.4 fake body").unwrap();

    let result = client_for(&server).upload_pdf(&file).await.expect("upload");
    assert_eq!(result.display_text(), "PDF ingested successfully!");
}

#[tokio::test]
async fn upload_surfaces_server_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Only PDF files are allowed."})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "plain text").unwrap();

    let err = client_for(&server).upload_pdf(&file).await.unwrap_err();
    match &err {
        ApiError::Server { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Only PDF files are allowed.");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(err.user_message(), "Only PDF files are allowed.");
}

#[tokio::test]
async fn upload_of_missing_file_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = client_for(&server)
        .upload_pdf(&dir.path().join("missing.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::File { .. }), "got {:?}", err);
}

#[tokio::test]
async fn ask_posts_json_with_float_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "question": "Who wrote it?",
            "model": "llama3:latest",
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "The author."})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = AskPayload {
        question: "Who wrote it?".into(),
        model: "llama3:latest".into(),
        temperature: 0.7,
    };
    let result = client_for(&server).ask(&payload).await.expect("answer");
    assert_eq!(result.display_text(), "The author.");
}

#[tokio::test]
async fn ask_without_answer_field_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let payload = AskPayload {
        question: "Q".into(),
        model: "m".into(),
        temperature: 0.2,
    };
    let result = client_for(&server).ask(&payload).await.expect("answer");
    assert_eq!(result.display_text(), "No answer.");
}
