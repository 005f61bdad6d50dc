use std::sync::RwLock;

use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::models::{RequestStatus, ServiceRequest, ServiceType};

/// Admin list filter: free-text search over client name, client email,
/// service type and id, plus an exact status match. Both optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestFilter {
    pub q: Option<String>,
    pub status: Option<RequestStatus>,
}

/// Data access the admin views are written against. The dashboard never
/// touches a concrete collection directly.
pub trait RequestStore: Send + Sync {
    fn list(&self, filter: &RequestFilter) -> Vec<ServiceRequest>;
    fn get(&self, id: &str) -> Option<ServiceRequest>;
    fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        note: Option<String>,
    ) -> Option<ServiceRequest>;
    fn count(&self) -> usize;
}

/// In-memory store. Nothing survives a restart; persistence is explicitly
/// out of scope for this service.
#[derive(Default)]
pub struct MemoryStore {
    requests: RwLock<Vec<ServiceRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requests(requests: Vec<ServiceRequest>) -> Self {
        Self {
            requests: RwLock::new(requests),
        }
    }
}

fn matches(request: &ServiceRequest, filter: &RequestFilter) -> bool {
    if let Some(status) = filter.status {
        if request.status != status {
            return false;
        }
    }
    match filter.q.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(term) => {
            let term = term.to_lowercase();
            request.client_name.to_lowercase().contains(&term)
                || request.client_email.to_lowercase().contains(&term)
                || request.service_type.to_string().to_lowercase().contains(&term)
                || request.id.to_lowercase().contains(&term)
        }
    }
}

impl RequestStore for MemoryStore {
    fn list(&self, filter: &RequestFilter) -> Vec<ServiceRequest> {
        let requests = self.requests.read().unwrap();
        requests
            .iter()
            .filter(|r| matches(r, filter))
            .cloned()
            .collect()
    }

    fn get(&self, id: &str) -> Option<ServiceRequest> {
        let requests = self.requests.read().unwrap();
        requests.iter().find(|r| r.id == id).cloned()
    }

    fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        note: Option<String>,
    ) -> Option<ServiceRequest> {
        let mut requests = self.requests.write().unwrap();
        let request = requests.iter_mut().find(|r| r.id == id)?;
        request.status = status;
        request.updated_at = Utc::now();
        if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
            request.notes.get_or_insert_with(Vec::new).push(note);
        }
        Some(request.clone())
    }

    fn count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

/// Demo requests for the admin dashboard, dated relative to startup.
pub fn seed_requests() -> Vec<ServiceRequest> {
    let now = Utc::now();
    vec![
        ServiceRequest {
            id: "req-123456".to_string(),
            client_name: "John Doe".to_string(),
            client_email: "john@example.com".to_string(),
            client_phone: Some("555-123-4567".to_string()),
            service_type: ServiceType::WebsiteDesign,
            description: "Need a modern website for my small business with e-commerce capabilities"
                .to_string(),
            budget: Some(2500.0),
            deadline: Some(now + Duration::days(30)),
            status: RequestStatus::InProgress,
            created_at: now - Duration::days(5),
            updated_at: now - Duration::days(2),
            notes: Some(vec![
                "Initial consultation completed".to_string(),
                "Wireframes in progress".to_string(),
            ]),
            attachments: Some(vec!["logo.png".to_string(), "inspiration.pdf".to_string()]),
        },
        ServiceRequest {
            id: "req-789012".to_string(),
            client_name: "Sarah Johnson".to_string(),
            client_email: "sarah@example.com".to_string(),
            client_phone: Some("555-987-6543".to_string()),
            service_type: ServiceType::GraphicDesign,
            description: "Need a new logo and brand identity package for my business".to_string(),
            budget: Some(800.0),
            deadline: Some(now + Duration::days(14)),
            status: RequestStatus::InReview,
            created_at: now - Duration::days(10),
            updated_at: now - Duration::days(1),
            notes: Some(vec![
                "Initial concepts delivered".to_string(),
                "Waiting for client feedback".to_string(),
            ]),
            attachments: None,
        },
        ServiceRequest {
            id: "req-345678".to_string(),
            client_name: "Mike Wilson".to_string(),
            client_email: "mike@example.com".to_string(),
            client_phone: None,
            service_type: ServiceType::ContentCreation,
            description: "Need 5 blog posts about digital marketing trends".to_string(),
            budget: None,
            deadline: None,
            status: RequestStatus::New,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
            notes: None,
            attachments: None,
        },
        ServiceRequest {
            id: "req-901234".to_string(),
            client_name: "Emily Brown".to_string(),
            client_email: "emily@example.com".to_string(),
            client_phone: Some("555-456-7890".to_string()),
            service_type: ServiceType::SeoOptimization,
            description: "Need help improving my website's search engine rankings".to_string(),
            budget: None,
            deadline: None,
            status: RequestStatus::PendingClientInput,
            created_at: now - Duration::days(15),
            updated_at: now - Duration::days(3),
            notes: Some(vec![
                "Initial audit completed".to_string(),
                "Waiting for access to Google Analytics".to_string(),
            ]),
            attachments: None,
        },
        ServiceRequest {
            id: "req-567890".to_string(),
            client_name: "David Lee".to_string(),
            client_email: "david@example.com".to_string(),
            client_phone: None,
            service_type: ServiceType::SocialMediaManagement,
            description: "Need help managing my company's social media presence".to_string(),
            budget: Some(1200.0),
            deadline: None,
            status: RequestStatus::Completed,
            created_at: now - Duration::days(45),
            updated_at: now - Duration::days(10),
            notes: Some(vec![
                "Strategy developed and implemented".to_string(),
                "3-month campaign completed".to_string(),
            ]),
            attachments: None,
        },
        ServiceRequest {
            id: "req-111222".to_string(),
            client_name: "Lisa Garcia".to_string(),
            client_email: "lisa@example.com".to_string(),
            client_phone: None,
            service_type: ServiceType::WebsiteDesign,
            description: "Portfolio website for photography business".to_string(),
            budget: None,
            deadline: None,
            status: RequestStatus::Cancelled,
            created_at: now - Duration::days(30),
            updated_at: now - Duration::days(25),
            notes: Some(vec!["Client decided to postpone the project".to_string()]),
            attachments: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryStore {
        MemoryStore::with_requests(seed_requests())
    }

    fn filter(q: Option<&str>, status: Option<RequestStatus>) -> RequestFilter {
        RequestFilter {
            q: q.map(str::to_string),
            status,
        }
    }

    #[test]
    fn empty_filter_lists_everything() {
        let store = seeded();
        assert_eq!(store.list(&RequestFilter::default()).len(), 6);
        assert_eq!(store.count(), 6);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let store = seeded();

        // client name
        assert_eq!(store.list(&filter(Some("SARAH"), None)).len(), 1);
        // client email
        assert_eq!(store.list(&filter(Some("mike@"), None)).len(), 1);
        // id
        assert_eq!(store.list(&filter(Some("req-111222"), None)).len(), 1);
        // service type matches two Website Design and one Graphic Design
        assert_eq!(store.list(&filter(Some("design"), None)).len(), 3);
    }

    #[test]
    fn status_filter_is_exact() {
        let store = seeded();
        let new = store.list(&filter(None, Some(RequestStatus::New)));
        assert_eq!(new.len(), 1);
        assert_eq!(new[0].client_name, "Mike Wilson");
    }

    #[test]
    fn search_and_status_compose() {
        let store = seeded();
        assert_eq!(
            store
                .list(&filter(Some("design"), Some(RequestStatus::Cancelled)))
                .len(),
            1
        );
        assert!(store
            .list(&filter(Some("design"), Some(RequestStatus::Completed)))
            .is_empty());
    }

    #[test]
    fn get_by_id() {
        let store = seeded();
        assert_eq!(
            store.get("req-123456").map(|r| r.client_name),
            Some("John Doe".to_string())
        );
        assert!(store.get("req-000000").is_none());
    }

    #[test]
    fn update_status_bumps_timestamp_and_appends_note() {
        let store = seeded();
        let before = store.get("req-345678").unwrap();

        let updated = store
            .update_status(
                "req-345678",
                RequestStatus::InReview,
                Some("Picked up by the design team".to_string()),
            )
            .unwrap();

        assert_eq!(updated.status, RequestStatus::InReview);
        assert!(updated.updated_at > before.updated_at);
        assert_eq!(
            updated.notes,
            Some(vec!["Picked up by the design team".to_string()])
        );

        // A second note lands behind the first.
        let updated = store
            .update_status("req-345678", RequestStatus::InProgress, Some("Kickoff done".to_string()))
            .unwrap();
        assert_eq!(updated.notes.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn update_status_without_note_leaves_notes_alone() {
        let store = seeded();
        let updated = store
            .update_status("req-345678", RequestStatus::Cancelled, Some("  ".to_string()))
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Cancelled);
        assert!(updated.notes.is_none());
    }

    #[test]
    fn update_status_unknown_id() {
        let store = seeded();
        assert!(store
            .update_status("req-000000", RequestStatus::New, None)
            .is_none());
    }
}
