//! REST API envelopes and status codes

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use common::*;
use lexsearch::api::build_app;
use lexsearch::api::handlers::SEARCH_UNAVAILABLE_MESSAGE;
use lexsearch::config::ServerConfig;
use lexsearch::rag::NO_RELEVANT_INFO_MESSAGE;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

fn app(h: &Harness) -> Router {
    build_app(Arc::new(h.pipeline.clone()), &ServerConfig::default())
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    send(app, method, uri, body).await
}

async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn civil_harness(generator: FakeGenerator) -> Harness {
    harness(
        FakeEmbedder::new(),
        FakeStore::with_records(civil_records()),
        generator,
    )
}

#[tokio::test]
async fn test_health() {
    let h = civil_harness(FakeGenerator::answering("unused"));
    let (status, body) = call(app(&h), "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_search_returns_documents_envelope() {
    let h = civil_harness(FakeGenerator::answering("unused"));
    let (status, body) = call(
        app(&h),
        "POST",
        "/api/legal/search",
        Some(json!({"query": "ขอคำปรึกษาคดีแพ่ง", "top_k": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["section"], 420);
    assert_eq!(data[0]["lawType"], "ประมวลกฎหมายแพ่งและพาณิชย์");
}

#[tokio::test]
async fn test_ask_returns_answer_and_outcome() {
    let h = civil_harness(FakeGenerator::answering("ตามมาตรา 420"));
    let (status, body) = call(
        app(&h),
        "POST",
        "/api/legal/ask",
        Some(json!({"question": "ขอคำปรึกษาคดีแพ่ง"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["answer"], "ตามมาตรา 420");
    assert_eq!(body["data"]["outcome"], "answered");
    assert_eq!(body["data"]["sources"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_ask_without_documents() {
    let h = harness(
        FakeEmbedder::new(),
        FakeStore::with_records(Vec::new()),
        FakeGenerator::answering("unused"),
    );
    let (status, body) = call(
        app(&h),
        "POST",
        "/api/legal/ask",
        Some(json!({"question": "คำถาม"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["answer"], NO_RELEVANT_INFO_MESSAGE);
    assert_eq!(body["data"]["outcome"], "no_relevant_documents");
}

#[tokio::test]
async fn test_embedding_failure_is_generic_bad_gateway() {
    let h = harness(
        FakeEmbedder::failing(),
        FakeStore::with_records(civil_records()),
        FakeGenerator::answering("unused"),
    );
    let (status, body) = call(
        app(&h),
        "POST",
        "/api/legal/ask",
        Some(json!({"question": "คำถาม"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], SEARCH_UNAVAILABLE_MESSAGE);
    assert!(!body.to_string().contains("unreachable"));
}

#[tokio::test]
async fn test_cite_returns_citation_lines() {
    let h = civil_harness(FakeGenerator::answering("unused"));
    let (status, body) = call(
        app(&h),
        "POST",
        "/api/legal/cite",
        Some(json!({"question": "ละเมิด", "threshold": 0.6})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let answer = body["data"]["answer"].as_str().unwrap();
    assert_eq!(answer.split("\n\n").count(), 2);
    assert!(answer.starts_with("ประมวลกฎหมายแพ่งและพาณิชย์ section 420: "));
    assert_eq!(h.generator.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_body_uses_envelope() {
    let h = civil_harness(FakeGenerator::answering("unused"));
    let (status, body) = send(
        app(&h),
        "POST",
        "/api/legal/search",
        Body::from("{\"query\": "),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert_eq!(h.embedder.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_field_uses_envelope() {
    let h = civil_harness(FakeGenerator::answering("unused"));
    let (status, body) = call(
        app(&h),
        "POST",
        "/api/legal/ask",
        Some(json!({"query": "wrong field"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("question"));
}

#[tokio::test(start_paused = true)]
async fn test_request_timeout_uses_envelope() {
    let h = harness_with_options(
        FakeEmbedder::new(),
        FakeStore::with_records(civil_records()),
        FakeGenerator::new(GeneratorBehaviour::Hang),
        lexsearch::rag::PipelineOptions {
            synthesis_timeout: Duration::from_secs(600),
            ..options()
        },
    );
    let server = ServerConfig {
        request_timeout_secs: 1,
        ..ServerConfig::default()
    };
    let app = build_app(Arc::new(h.pipeline.clone()), &server);

    let (status, body) = call(
        app,
        "POST",
        "/api/legal/ask",
        Some(json!({"question": "ขอคำปรึกษาคดีแพ่ง"})),
    )
    .await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Request timed out");
}
