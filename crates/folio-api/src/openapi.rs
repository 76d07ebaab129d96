//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the portfolio API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "0.1.0",
        description = "Contact submission, reply suggestion, and project catalog endpoints for the portfolio site.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::contact::submit_contact,
        crate::routes::suggest::suggest_reply,
        crate::routes::projects::list_projects,
        crate::routes::projects::get_project,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::reply::MessageKind,
        crate::state::ContactRecord,
        crate::routes::contact::ContactRequest,
        crate::routes::contact::ContactResponse,
        crate::routes::suggest::SuggestRequest,
        crate::routes::suggest::SuggestResponse,
        crate::routes::suggest::SuggestionMetadata,
        crate::routes::projects::ProjectView,
        crate::routes::projects::ProjectImageView,
        crate::routes::projects::ProjectList,
    )),
    tags(
        (name = "contact", description = "Contact form and reply drafting"),
        (name = "projects", description = "Project catalog"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
