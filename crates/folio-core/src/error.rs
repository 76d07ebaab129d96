//! # Error Hierarchy
//!
//! Structured error types for the portfolio core, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.

use thiserror::Error;

/// Top-level error type for the portfolio core.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// URL fragment could not be interpreted.
    #[error("fragment error: {0}")]
    Fragment(#[from] FragmentError),

    /// Project catalog integrity failure.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// I/O error while loading project data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error while loading project data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not a canonical slug.
    #[error("invalid slug: \"{0}\" (expected lower-case [a-z0-9] runs joined by single hyphens)")]
    InvalidSlug(String),
}

/// Errors produced when interpreting a URL fragment.
///
/// Every variant means "no navigation intent": callers ignore the fragment
/// rather than surfacing the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// The fragment has key/value structure but names no project.
    #[error("fragment \"{0}\" does not name a project")]
    MissingProject(String),
}

/// Errors raised while assembling a project catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two project titles derive the same slug, so one of them could never be
    /// deep-linked.
    #[error("projects \"{first}\" and \"{second}\" share the slug \"{slug}\"")]
    DuplicateSlug {
        /// The colliding slug.
        slug: String,
        /// Title of the project that claimed the slug first.
        first: String,
        /// Title of the project that collided with it.
        second: String,
    },
}
