//! # Project Catalog API
//!
//! Read-only listing of the catalog the gallery navigates. Each entry
//! carries its slug, which is what the gallery's URL fragment names.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use folio_core::{Project, ProjectImage};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, ErrorBody};
use crate::extractors::Validate;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Listing filters and pagination.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectQuery {
    /// Page size, 1 to 100. Defaults to 10.
    pub limit: Option<i64>,
    /// Projects to skip. Defaults to 0.
    pub offset: Option<i64>,
    /// Case-insensitive match against title and description.
    pub search: Option<String>,
    /// Case-insensitive match against any tech tag.
    pub tech: Option<String>,
}

impl Validate for ProjectQuery {
    fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(format!("limit must be between 1 and {MAX_LIMIT}"));
            }
        }
        if self.offset.is_some_and(|offset| offset < 0) {
            return Err("offset must not be negative".to_string());
        }
        Ok(())
    }
}

impl ProjectQuery {
    fn matches(&self, project: &Project) -> bool {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        if let Some(needle) = search {
            let hit = project.title.to_lowercase().contains(&needle)
                || project.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        let tech = self
            .tech
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        match tech {
            Some(needle) => project
                .tech
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle)),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectImageView {
    pub src: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

impl From<&ProjectImage> for ProjectImageView {
    fn from(image: &ProjectImage) -> Self {
        Self {
            src: image.src.clone(),
            alt: image.alt.clone(),
            caption: image.caption.clone(),
        }
    }
}

/// A project as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub tech: Vec<String>,
    pub repo_url: Option<String>,
    pub images: Vec<ProjectImageView>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            slug: project.slug().to_string(),
            title: project.title.clone(),
            description: project.description.clone(),
            long_description: project.long_description.clone(),
            tech: project.tech.clone(),
            repo_url: project.repo_url.clone(),
            images: project.images.iter().map(ProjectImageView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectList {
    pub projects: Vec<ProjectView>,
    /// Matches before pagination.
    pub total: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{slug}", get(get_project))
}

/// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ProjectQuery),
    responses(
        (status = 200, description = "Matching projects", body = ProjectList),
        (status = 400, description = "Unparseable query", body = ErrorBody),
        (status = 422, description = "Out-of-range pagination", body = ErrorBody),
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    query: Result<Query<ProjectQuery>, QueryRejection>,
) -> Result<Json<ProjectList>, AppError> {
    let Query(query) = query.map_err(|err| AppError::BadRequest(err.body_text()))?;
    query.validate().map_err(AppError::Validation)?;

    let limit = usize::try_from(query.limit.unwrap_or(DEFAULT_LIMIT)).unwrap_or(0);
    let offset = usize::try_from(query.offset.unwrap_or(0)).unwrap_or(0);

    let matching: Vec<&Project> = state.catalog.iter().filter(|p| query.matches(p)).collect();
    let total = matching.len();
    let projects = matching
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(ProjectView::from)
        .collect();

    Ok(Json(ProjectList { projects, total }))
}

/// GET /api/projects/{slug}
#[utoipa::path(
    get,
    path = "/api/projects/{slug}",
    params(("slug" = String, Path, description = "Project slug")),
    responses(
        (status = 200, description = "The project", body = ProjectView),
        (status = 404, description = "No project with this slug", body = ErrorBody),
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectView>, AppError> {
    state
        .catalog
        .resolve_str(&slug)
        .map(|(_, project)| Json(ProjectView::from(project)))
        .ok_or_else(|| AppError::NotFound(format!("project \"{slug}\"")))
}
