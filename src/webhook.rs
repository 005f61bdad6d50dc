use reqwest::Client;
use tracing::{debug, error};

use crate::models::WebhookPayload;

/// Relay to the workflow-automation webhook. One attempt per submission,
/// no retry, no backoff; delivery failure never reaches the submitter.
#[derive(Debug, Clone)]
pub struct WebhookForwarder {
    client: Client,
    url: String,
}

impl WebhookForwarder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hands the payload to a detached task and returns immediately, so
    /// webhook latency or downtime cannot delay the caller's response.
    pub fn dispatch(&self, payload: WebhookPayload) {
        let client = self.client.clone();
        let url = self.url.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!("Webhook accepted request {}", payload.request_id);
                }
                Ok(resp) => {
                    error!(
                        "Webhook rejected request {} with status {}",
                        payload.request_id,
                        resp.status()
                    );
                }
                Err(e) => {
                    error!(
                        "Error triggering webhook for request {}: {e}",
                        payload.request_id
                    );
                }
            }
        });
    }
}
