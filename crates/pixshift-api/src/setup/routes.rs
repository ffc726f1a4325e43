//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use pixshift_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let body_limit = config.max_upload_size_bytes();
    let http_concurrency_limit = config.http_concurrency_limit();

    tracing::info!(
        http_concurrency_limit,
        max_upload_size_bytes = body_limit,
        "HTTP limits configured"
    );

    let transform_routes = Router::new()
        .route("/convert", post(handlers::transform::convert_images))
        .route("/resize", post(handlers::transform::resize_images))
        .route("/compress", post(handlers::transform::compress_images))
        // The request body limit below replaces axum's 2 MB extractor default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit));

    Router::new()
        .route("/health", get(handlers::health::liveness_check))
        .merge(transform_routes)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
