#![deny(missing_docs)]

//! # folio-core — Foundational Types for the Portfolio Site
//!
//! Types shared by the gallery navigator and the HTTP service. No internal
//! crate dependencies; only `serde`, `serde_json`, `thiserror`, `url` and
//! `tracing` from the external ecosystem.
//!
//! - [`Project`] / [`ProjectImage`]: records supplied by the site's data layer.
//! - [`Slug`]: URL-safe identifier derived purely from a project title.
//! - [`Catalog`]: ordered projects indexed by slug; rejects slug collisions.
//! - [`Fragment`]: the `#project=<slug>&slide=<n>` deep-link codec.
//! - [`FolioError`]: structured error hierarchy.

pub mod error;
pub mod fragment;
pub mod project;
pub mod slug;

pub use error::{CatalogError, FolioError, FragmentError, ValidationError};
pub use fragment::Fragment;
pub use project::{Catalog, Project, ProjectImage, ProjectIndex};
pub use slug::Slug;
