use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, warn};
use uuid::Uuid;

use crate::{
    form,
    models::{FormValues, HealthResponse, ServiceRequest, StatusUpdate, WebhookPayload},
    store::{RequestFilter, RequestStore},
    webhook::WebhookForwarder,
};

pub struct AppState {
    pub store: Arc<dyn RequestStore>,
    pub webhook: WebhookForwarder,
}

fn processing_error(cause: impl std::fmt::Display) -> (StatusCode, Json<Value>) {
    error!("Error processing service request: {cause}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Failed to process service request"})),
    )
}

fn not_found(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": msg})))
}

fn bad_request(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"error": msg})))
}

// ────────────────────────────────────────────────────────────────────────────
// Intake
// ────────────────────────────────────────────────────────────────────────────

/// CORS preflight: answered unconditionally, no business logic.
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({})))
}

pub async fn submit_request(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    let form: FormValues = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(e) => return processing_error(e).into_response(),
    };

    // The public form validates before submitting; direct API callers may
    // not. Worth a log line, but never a rejection.
    let violations = form::validate_values(&form);
    if !violations.is_empty() {
        warn!(
            "Submission from {} skipped client-side validation: {} field(s) invalid",
            form.email,
            violations.len()
        );
    }

    let submitted_at = Utc::now();
    let id = Uuid::new_v4().to_string();
    let record = ServiceRequest::from_submission(&form, id.clone(), submitted_at);

    // Fire-and-forget: the workflow trigger's outcome never changes what the
    // submitter sees.
    state.webhook.dispatch(WebhookPayload {
        form,
        request_id: id,
        submitted_at,
    });

    (StatusCode::CREATED, Json(json!(record))).into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// Admin
// ────────────────────────────────────────────────────────────────────────────

pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RequestFilter>,
) -> impl IntoResponse {
    let requests = state.store.list(&filter);
    (StatusCode::OK, Json(json!(requests)))
}

pub async fn get_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get(&id) {
        Some(request) => (StatusCode::OK, Json(json!(request))).into_response(),
        None => not_found("request not found").into_response(),
    }
}

pub async fn update_request_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let update: StatusUpdate = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => return bad_request(&format!("invalid status update: {e}")).into_response(),
    };

    match state.store.update_status(&id, update.status, update.note) {
        Some(request) => (StatusCode::OK, Json(json!(request))).into_response(),
        None => not_found("request not found").into_response(),
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok".to_string(),
        requests: state.store.count(),
    };
    (StatusCode::OK, Json(json!(resp)))
}
