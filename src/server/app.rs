use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::triggers::{fallback, github_webhook};

use super::AppState;

pub fn create_app(state: AppState) -> Router {
    let max_body_bytes = state.settings.server.max_body_bytes;

    Router::new()
        // GitHub is configured with either form of the URL
        .route("/webhook", post(github_webhook).fallback(fallback))
        .route("/webhook/", post(github_webhook).fallback(fallback))
        .fallback(fallback)
        // Replace axum's 2 MB default with the configured limit
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
