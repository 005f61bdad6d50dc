//! Three-step intake form flow: per-step validation, gated forward
//! navigation, and assembly of the final submission payload.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{FormValues, ServiceType};

pub const NAME_MIN: usize = 2;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 1000;

/// The form's three sequential steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    BasicInfo,
    ServiceDetails,
    Finalize,
}

impl Step {
    fn next(self) -> Option<Step> {
        match self {
            Step::BasicInfo => Some(Step::ServiceDetails),
            Step::ServiceDetails => Some(Step::Finalize),
            Step::Finalize => None,
        }
    }

    fn back(self) -> Option<Step> {
        match self {
            Step::BasicInfo => None,
            Step::ServiceDetails => Some(Step::BasicInfo),
            Step::Finalize => Some(Step::ServiceDetails),
        }
    }
}

/// Working copy of the form while the visitor is still filling it in.
/// Discarded on submit; nothing here outlives the session.
#[derive(Debug, Clone, Default)]
pub struct RequestDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_type: Option<ServiceType>,
    pub description: String,
    pub budget: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub attachments: Vec<String>,
    pub additional_notes: Option<String>,
}

/// A single inline validation message, addressed to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

fn err(field: &'static str, message: impl Into<String>) -> FieldError {
    FieldError {
        field,
        message: message.into(),
    }
}

/// Checks only the fields belonging to `step`, in a fixed field order, so
/// the same draft always yields the same error list. Pure: no mutation,
/// no side effects.
pub fn validate_step(step: Step, draft: &RequestDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match step {
        Step::BasicInfo => {
            if draft.name.chars().count() < NAME_MIN {
                errors.push(err("name", "Name must be at least 2 characters"));
            }
            if !is_valid_email(&draft.email) {
                errors.push(err("email", "Please enter a valid email address"));
            }
            // phone is free-form and optional
        }
        Step::ServiceDetails => {
            if draft.service_type.is_none() {
                errors.push(err("serviceType", "Please select a service type"));
            }
            let len = draft.description.chars().count();
            if len < DESCRIPTION_MIN {
                errors.push(err(
                    "description",
                    "Description must be at least 10 characters",
                ));
            } else if len > DESCRIPTION_MAX {
                errors.push(err(
                    "description",
                    "Description must not exceed 1000 characters",
                ));
            }
        }
        // Budget, deadline, attachments and notes are all optional.
        Step::Finalize => {}
    }

    errors
}

/// Re-validates the union of all three step schemas and produces the
/// submission payload. On failure returns the full error set.
pub fn finalize(draft: &RequestDraft) -> Result<FormValues, Vec<FieldError>> {
    let mut errors = Vec::new();
    for step in [Step::BasicInfo, Step::ServiceDetails, Step::Finalize] {
        errors.extend(validate_step(step, draft));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let Some(service_type) = draft.service_type else {
        return Err(vec![err("serviceType", "Please select a service type")]);
    };

    Ok(FormValues {
        name: draft.name.clone(),
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        service_type,
        description: draft.description.clone(),
        budget: draft.budget.clone(),
        deadline: draft.deadline,
        attachments: if draft.attachments.is_empty() {
            None
        } else {
            Some(draft.attachments.clone())
        },
        additional_notes: draft.additional_notes.clone(),
    })
}

/// Validates a complete payload against the union schema. Lets the server
/// notice submissions that skipped the form's own gating (direct API calls).
pub fn validate_values(values: &FormValues) -> Vec<FieldError> {
    let draft = RequestDraft {
        name: values.name.clone(),
        email: values.email.clone(),
        phone: values.phone.clone(),
        service_type: Some(values.service_type),
        description: values.description.clone(),
        budget: values.budget.clone(),
        deadline: values.deadline,
        attachments: values.attachments.clone().unwrap_or_default(),
        additional_notes: values.additional_notes.clone(),
    };
    let mut errors = validate_step(Step::BasicInfo, &draft);
    errors.extend(validate_step(Step::ServiceDetails, &draft));
    errors
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// One visitor's pass through the form. Forward navigation is gated on the
/// current step validating; moving backward never re-checks anything.
#[derive(Debug, Default)]
pub struct FormSession {
    step: Step,
    draft: RequestDraft,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RequestDraft {
        &mut self.draft
    }

    /// Moves to the next step if the current one validates; otherwise stays
    /// put and hands back the field errors for inline display.
    pub fn advance(&mut self) -> Result<Step, Vec<FieldError>> {
        let errors = validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            return Err(errors);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Always permitted (except on the first step, where it is a no-op).
    pub fn retreat(&mut self) -> Step {
        if let Some(prev) = self.step.back() {
            self.step = prev;
        }
        self.step
    }

    pub fn finalize(&self) -> Result<FormValues, Vec<FieldError>> {
        finalize(&self.draft)
    }
}
