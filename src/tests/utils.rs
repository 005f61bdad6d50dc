use std::sync::Arc;

use axum::Router;

use crate::handlers::AppState;
use crate::router::router;
use crate::store::{seed_requests, MemoryStore, RequestStore};
use crate::webhook::WebhookForwarder;

// Nothing listens here: every forward fails, which must never be visible
// to the submitter.
pub const DEAD_WEBHOOK: &str = "http://127.0.0.1:59999/webhook/service-requests";

pub fn test_app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

pub fn seeded_app() -> Router {
    app_with_store(Arc::new(MemoryStore::with_requests(seed_requests())))
}

pub fn app_with_store(store: Arc<dyn RequestStore>) -> Router {
    router(Arc::new(AppState {
        store,
        webhook: WebhookForwarder::new(DEAD_WEBHOOK),
    }))
}
