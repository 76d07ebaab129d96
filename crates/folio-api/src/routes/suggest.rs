//! # Reply Suggestion API
//!
//! Drafts a reply for a contact message without storing anything. Returns
//! 503 when the service runs without a drafter.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, ErrorBody};
use crate::extractors::{check_length, extract_validated_json, is_valid_email, Validate};
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitGuard};
use crate::reply::{Inquiry, PROMPT_VERSION};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SuggestRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for SuggestRequest {
    fn validate(&self) -> Result<(), String> {
        check_length("name", self.name.trim(), 1, 100)?;
        if !is_valid_email(self.email.trim()) {
            return Err("invalid email format".to_string());
        }
        check_length("message", self.message.trim(), 10, 1000)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionMetadata {
    pub model: String,
    pub prompt_version: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestResponse {
    pub success: bool,
    pub suggestion: String,
    pub metadata: SuggestionMetadata,
}

/// Build the suggestion router, rate limited by the configured suggest policy.
pub fn router(state: &AppState) -> Router<AppState> {
    let guard = RateLimitGuard::new(state.limiter.clone(), state.config.suggest_policy.clone());
    Router::new()
        .route("/api/ai/suggest-reply", post(suggest_reply))
        .route_layer(from_fn_with_state(guard, rate_limit_middleware))
}

/// POST /api/ai/suggest-reply
#[utoipa::path(
    post,
    path = "/api/ai/suggest-reply",
    request_body = SuggestRequest,
    responses(
        (status = 200, description = "Drafted reply", body = SuggestResponse),
        (status = 422, description = "Validation failed", body = ErrorBody),
        (status = 429, description = "Too many requests from this client", body = ErrorBody),
        (status = 503, description = "Reply drafting is disabled", body = ErrorBody),
    ),
    tag = "contact"
)]
pub async fn suggest_reply(
    State(state): State<AppState>,
    body: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<SuggestResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let drafter = state
        .drafter
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("reply drafting is disabled".to_string()))?;

    let suggestion = drafter
        .draft(&Inquiry {
            name: req.name.trim(),
            email: req.email.trim(),
            message: req.message.trim(),
        })
        .map_err(|err| AppError::Internal(err.to_string()))?;

    tracing::debug!(model = drafter.model(), "reply suggestion drafted");

    Ok(Json(SuggestResponse {
        success: true,
        suggestion,
        metadata: SuggestionMetadata {
            model: drafter.model().to_string(),
            prompt_version: PROMPT_VERSION.to_string(),
            generated_at: Utc::now(),
        },
    }))
}
