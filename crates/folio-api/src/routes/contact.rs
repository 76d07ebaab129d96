//! # Contact Submission API
//!
//! Accepts the site's contact form. Each accepted submission is stored with
//! a drafted reply (when drafting is enabled) for the owner to review.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::{check_length, extract_validated_json, is_valid_email, Validate};
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitGuard};
use crate::reply::{Inquiry, MessageKind};
use crate::state::{AppState, ContactRecord};

/// Contact form body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<(), String> {
        check_length("name", self.name.trim(), 1, 100)?;
        if !is_valid_email(self.email.trim()) {
            return Err("invalid email format".to_string());
        }
        if let Some(subject) = &self.subject {
            check_length("subject", subject.trim(), 0, 200)?;
        }
        check_length("message", self.message.trim(), 10, 1000)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub contact_id: Uuid,
}

/// Build the contact router, rate limited by the configured contact policy.
pub fn router(state: &AppState) -> Router<AppState> {
    let guard = RateLimitGuard::new(state.limiter.clone(), state.config.contact_policy.clone());
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route_layer(from_fn_with_state(guard, rate_limit_middleware))
}

/// POST /api/contact
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission stored", body = ContactResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
        (status = 429, description = "Too many submissions from this client", body = ErrorBody),
    ),
    tag = "contact"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_string();
    let message = req.message.trim().to_string();

    let inquiry = Inquiry {
        name: &name,
        email: &email,
        message: &message,
    };
    let suggested_reply = state
        .drafter
        .as_ref()
        .and_then(|drafter| match drafter.draft(&inquiry) {
            Ok(reply) => Some(reply),
            Err(err) => {
                tracing::warn!(error = %err, "reply drafting failed, storing submission without draft");
                None
            }
        });

    let now = Utc::now();
    let record = ContactRecord {
        id: Uuid::new_v4(),
        kind: MessageKind::classify(&message),
        subject: req
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        name,
        email,
        message,
        replied: false,
        suggested_reply,
        created_at: now,
        updated_at: now,
    };
    let contact_id = record.id;

    tracing::info!(
        %contact_id,
        kind = %record.kind,
        message_len = record.message.chars().count(),
        drafted = record.suggested_reply.is_some(),
        "contact submission stored"
    );
    state.contacts.insert(contact_id, record);

    Ok(Json(ContactResponse {
        success: true,
        message: "Message sent successfully!".to_string(),
        contact_id,
    }))
}
