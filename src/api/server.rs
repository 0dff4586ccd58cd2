//! HTTP server implementation

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::Router;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::handle_middleware_error;
use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::ServerConfig;
use crate::rag::LegalSearchPipeline;
use crate::Result;

/// Full application router with middleware
pub fn build_app(pipeline: Arc<LegalSearchPipeline>, server: &ServerConfig) -> Router {
    let state = AppState { pipeline };

    let mut app = Router::new().nest("/api", routes::api_routes(state)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(Duration::from_secs(
                server.request_timeout_secs,
            )))
            .layer(CompressionLayer::new()),
    );

    // Add CORS if enabled
    if server.enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(pipeline: Arc<LegalSearchPipeline>, server: &ServerConfig) -> Result<()> {
    info!("🚀 Starting lexsearch API server...");

    let app = build_app(pipeline, server);

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health         - Health check");
    info!("  POST /api/legal/search   - Semantic document search");
    info!("  POST /api/legal/ask      - Grounded answer");
    info!("  POST /api/legal/cite     - Citation answer");

    axum::serve(listener, app).await?;

    Ok(())
}
