mod common;

use axum::http::StatusCode;
use backend::providers::huggingface::format_llama_prompt;
use backend::providers::{DialogueProvider, HuggingFaceProvider, OpenAiProvider, ProviderError};
use common::Stub;
use serde_json::json;
use std::time::Duration;

fn hugging_face(stub: &Stub) -> HuggingFaceProvider {
    HuggingFaceProvider::new(
        reqwest::Client::new(),
        "hf_test",
        stub.base.clone(),
        "meta-llama/Test-Model",
    )
}

fn open_ai(stub: &Stub) -> OpenAiProvider {
    OpenAiProvider::new(reqwest::Client::new(), "sk-test", stub.base.clone(), "gpt-test")
}

#[tokio::test]
async fn hugging_face_sends_templated_prompt() {
    let stub = Stub::json(&json!([{ "generated_text": "Max: Go." }])).await;

    let text = hugging_face(&stub)
        .generate("Write a scene.", "You write scenes.")
        .await
        .unwrap();
    assert_eq!(text, "Max: Go.");

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/models/meta-llama/Test-Model");
    assert_eq!(request.headers["authorization"], "Bearer hf_test");
    assert_eq!(
        request.body["inputs"],
        format_llama_prompt("You write scenes.", "Write a scene.")
    );
    assert_eq!(request.body["parameters"]["temperature"], 0.7);
    assert_eq!(request.body["parameters"]["max_new_tokens"], 1024);
    assert_eq!(request.body["parameters"]["return_full_text"], false);
}

#[tokio::test]
async fn hugging_face_accepts_single_object_and_list() {
    let single = Stub::json(&json!({ "generated_text": "X" })).await;
    let list = Stub::json(&json!([{ "generated_text": "X" }])).await;

    let from_single = hugging_face(&single).generate("i", "s").await.unwrap();
    let from_list = hugging_face(&list).generate("i", "s").await.unwrap();
    assert_eq!(from_single, "X");
    assert_eq!(from_single, from_list);
}

#[tokio::test]
async fn hugging_face_empty_text_is_provider_error() {
    let stub = Stub::json(&json!([{ "generated_text": "" }])).await;
    assert!(matches!(
        hugging_face(&stub).generate("i", "s").await,
        Err(ProviderError::Empty)
    ));
}

#[tokio::test]
async fn non_success_status_keeps_body() {
    let stub = Stub::start(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"error":"Model meta-llama/Test-Model is currently loading"}"#,
    )
    .await;

    match hugging_face(&stub).generate("i", "s").await {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert!(body.contains("currently loading"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(stub.requests().len(), 1, "no retry expected");
}

#[tokio::test]
async fn open_ai_reads_first_choice() {
    let stub = Stub::json(&json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": "Lena: Not yet." }, "finish_reason": "stop" }
        ]
    }))
    .await;

    let text = open_ai(&stub)
        .generate("Write a scene.", "You write scenes.")
        .await
        .unwrap();
    assert_eq!(text, "Lena: Not yet.");

    let request = &stub.requests()[0];
    assert_eq!(request.path, "/chat/completions");
    assert_eq!(request.headers["authorization"], "Bearer sk-test");
    assert_eq!(request.body["model"], "gpt-test");
    assert_eq!(request.body["messages"][0]["role"], "system");
    assert_eq!(request.body["messages"][0]["content"], "You write scenes.");
    assert_eq!(request.body["messages"][1]["role"], "user");
    assert_eq!(request.body["messages"][1]["content"], "Write a scene.");
}

#[tokio::test]
async fn open_ai_unauthorized_is_status_error() {
    let stub = Stub::start(
        StatusCode::UNAUTHORIZED,
        r#"{"error":{"message":"Incorrect API key provided"}}"#,
    )
    .await;

    let err = open_ai(&stub).generate("i", "s").await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 401, .. }));
    assert!(err.to_string().contains("Incorrect API key"));
}

#[tokio::test]
async fn malformed_body_is_provider_error() {
    let stub = Stub::start(StatusCode::OK, "<html>bad gateway</html>").await;
    assert!(matches!(
        open_ai(&stub).generate("i", "s").await,
        Err(ProviderError::Malformed(_))
    ));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let stub = Stub::start_delayed(
        StatusCode::OK,
        json!({ "generated_text": "late" }).to_string(),
        Duration::from_secs(2),
    )
    .await;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let provider = HuggingFaceProvider::new(client, "hf_test", stub.base.clone(), "m");

    match provider.generate("i", "s").await {
        Err(ProviderError::Transport(e)) => assert!(e.is_timeout()),
        other => panic!("unexpected result: {:?}", other),
    }
}
