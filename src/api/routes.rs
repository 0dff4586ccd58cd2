//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Legal search endpoints
        .route("/legal/search", post(handlers::search_documents))
        .route("/legal/ask", post(handlers::ask_question))
        .route("/legal/cite", post(handlers::cite_documents))
        .with_state(state)
}
