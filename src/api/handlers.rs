//! API request handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::BoxError;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::types::ApiResponse;
use crate::api::types::AskRequest;
use crate::api::types::CitationResponse;
use crate::api::types::CiteRequest;
use crate::api::types::HealthResponse;
use crate::api::types::LegalSearchRequest;
use crate::errors::LexSearchError;
use crate::models::LegalDocument;
use crate::rag::generate_enhanced_answer;
use crate::rag::LegalAnswer;
use crate::rag::LegalSearchPipeline;

/// Largest `top_k` a caller may request
pub const MAX_TOP_K: usize = 20;

/// Message returned when the question could not be embedded; the cause stays in the logs
pub const SEARCH_UNAVAILABLE_MESSAGE: &str = "Legal search is temporarily unavailable";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<LegalSearchPipeline>,
}

type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(data: T) -> ApiResult<T> {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

fn failed<T>(route: &str, e: &LexSearchError) -> ApiResult<T> {
    error!(error = %e, "{} failed", route);
    (
        StatusCode::BAD_GATEWAY,
        Json(ApiResponse::error(SEARCH_UNAVAILABLE_MESSAGE)),
    )
}

fn rejected<T>(route: &str, rejection: &JsonRejection) -> ApiResult<T> {
    warn!("{} rejected request body: {}", route, rejection.body_text());
    (
        rejection.status(),
        Json(ApiResponse::error(rejection.body_text())),
    )
}

/// Errors raised by the middleware stack, reported in the usual envelope
pub async fn handle_middleware_error(err: BoxError) -> ApiResult<()> {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("Request timed out");
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(ApiResponse::error("Request timed out")),
        )
    } else {
        error!(error = %err, "Unhandled middleware error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Internal server error")),
        )
    }
}

fn clamp_top_k(top_k: Option<usize>) -> Option<usize> {
    top_k.map(|k| k.clamp(1, MAX_TOP_K))
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Semantic search (POST /api/legal/search)
pub async fn search_documents(
    State(state): State<AppState>,
    payload: Result<Json<LegalSearchRequest>, JsonRejection>,
) -> ApiResult<Vec<LegalDocument>> {
    info!("POST /api/legal/search");
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => return rejected("/api/legal/search", &rejection),
    };

    match state
        .pipeline
        .search(&req.query, clamp_top_k(req.top_k), req.threshold)
        .await
    {
        Ok(documents) => ok(documents),
        Err(e) => failed("/api/legal/search", &e),
    }
}

/// Grounded answer (POST /api/legal/ask)
pub async fn ask_question(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> ApiResult<LegalAnswer> {
    info!("POST /api/legal/ask");
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => return rejected("/api/legal/ask", &rejection),
    };

    match state.pipeline.answer_with_sources(&req.question).await {
        Ok(answer) => ok(answer),
        Err(e) => failed("/api/legal/ask", &e),
    }
}

/// Deterministic citation answer (POST /api/legal/cite)
pub async fn cite_documents(
    State(state): State<AppState>,
    payload: Result<Json<CiteRequest>, JsonRejection>,
) -> ApiResult<CitationResponse> {
    info!("POST /api/legal/cite");
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => return rejected("/api/legal/cite", &rejection),
    };

    match state
        .pipeline
        .search(&req.question, clamp_top_k(req.top_k), req.threshold)
        .await
    {
        Ok(sources) => ok(CitationResponse {
            answer: generate_enhanced_answer(&req.question, &sources),
            sources,
        }),
        Err(e) => failed("/api/legal/cite", &e),
    }
}
