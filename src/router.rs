use std::sync::Arc;

use axum::{
    http::{HeaderName, HeaderValue},
    routing::{get, put},
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

fn cors_header(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Intake + admin list
        .route(
            "/api/service-requests",
            axum::routing::post(handlers::submit_request)
                .options(handlers::preflight)
                .get(handlers::list_requests),
        )
        .route("/api/service-requests/:id", get(handlers::get_request))
        .route(
            "/api/service-requests/:id/status",
            put(handlers::update_request_status),
        )
        // The public form reads these off every response, errors included.
        .layer(cors_header("access-control-allow-origin", "*"))
        .layer(cors_header("access-control-allow-methods", "POST, OPTIONS"))
        .layer(cors_header("access-control-allow-headers", "Content-Type"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
