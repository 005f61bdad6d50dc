use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Website Design")]
    WebsiteDesign,
    #[serde(rename = "Graphic Design")]
    GraphicDesign,
    #[serde(rename = "Social Media Management")]
    SocialMediaManagement,
    #[serde(rename = "Content Creation")]
    ContentCreation,
    #[serde(rename = "SEO Optimization")]
    SeoOptimization,
    Other,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WebsiteDesign => "Website Design",
            Self::GraphicDesign => "Graphic Design",
            Self::SocialMediaManagement => "Social Media Management",
            Self::ContentCreation => "Content Creation",
            Self::SeoOptimization => "SEO Optimization",
            Self::Other => "Other",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle states shown on the admin dashboard. No transition graph is
/// enforced anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    New,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pending Client Input")]
    PendingClientInput,
    Completed,
    Cancelled,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "New",
            Self::InReview => "In Review",
            Self::InProgress => "In Progress",
            Self::PendingClientInput => "Pending Client Input",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        write!(f, "{s}")
    }
}

/// The payload the public intake form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub service_type: ServiceType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub client_name: String,
    pub client_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

impl ServiceRequest {
    /// Maps a submitted form onto a fresh record. The record is never
    /// persisted; it only travels back to the caller and out to the webhook.
    pub fn from_submission(form: &FormValues, id: String, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            client_name: form.name.clone(),
            client_email: form.email.clone(),
            client_phone: form.phone.clone(),
            service_type: form.service_type,
            description: form.description.clone(),
            budget: form.budget.as_deref().and_then(parse_budget),
            deadline: form.deadline,
            status: RequestStatus::New,
            created_at: submitted_at,
            updated_at: submitted_at,
            notes: form
                .additional_notes
                .clone()
                .filter(|n| !n.is_empty())
                .map(|n| vec![n]),
            attachments: form.attachments.clone(),
        }
    }
}

/// Extracts a numeric budget from the form's free-text field.
/// Everything outside `[0-9.-]` is stripped before parsing; anything that
/// still fails to parse is treated as "no budget given", never an error.
pub fn parse_budget(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// What the workflow-automation webhook receives for each submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(flatten)]
    pub form: FormValues,
    pub request_id: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub requests: usize,
}

/// Body of the admin status-update call.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
    #[serde(default)]
    pub note: Option<String>,
}
