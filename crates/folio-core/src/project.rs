//! # Project Records & Catalog
//!
//! Project records are supplied by the surrounding site (a static
//! `projects.json` or a database-backed listing). This crate never fetches
//! them; it only gives them types and indexes them by [`Slug`].

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, FolioError};
use crate::slug::Slug;

/// One image in a project's gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectImage {
    /// Image source URL.
    pub src: String,
    /// Alternative text.
    #[serde(default)]
    pub alt: Option<String>,
    /// Caption shown under the image. Hidden when absent.
    #[serde(default)]
    pub caption: Option<String>,
}

/// A portfolio project as supplied by the data collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Display name; the slug is derived from it.
    #[serde(default)]
    pub title: String,
    /// Short description shown on cards and as fallback detail text.
    #[serde(default)]
    pub description: String,
    /// Optional rich detail text.
    #[serde(default)]
    pub long_description: Option<String>,
    /// Technologies, in display order.
    #[serde(default)]
    pub tech: Vec<String>,
    /// Source repository link.
    #[serde(default, alias = "repoURL")]
    pub repo_url: Option<String>,
    /// Gallery images, in display order. May be empty.
    #[serde(default)]
    pub images: Vec<ProjectImage>,
}

impl Project {
    /// The URL-safe slug for this project.
    pub fn slug(&self) -> Slug {
        Slug::from_title(&self.title)
    }

    /// Number of gallery images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Detail text: the long description when it has content, else the short one.
    pub fn detail_text(&self) -> &str {
        match self.long_description.as_deref().map(str::trim) {
            Some(long) if !long.is_empty() => long,
            _ => &self.description,
        }
    }
}

/// Position of a project inside a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectIndex(pub usize);

/// Ordered, slug-indexed collection of projects.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    by_slug: HashMap<Slug, ProjectIndex>,
}

impl Catalog {
    /// Index `projects` by slug, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSlug`] if two titles derive the same slug.
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut by_slug = HashMap::with_capacity(projects.len());
        for (i, project) in projects.iter().enumerate() {
            let slug = project.slug();
            if let Some(ProjectIndex(prev)) = by_slug.get(&slug) {
                return Err(CatalogError::DuplicateSlug {
                    slug: slug.to_string(),
                    first: projects[*prev].title.clone(),
                    second: project.title.clone(),
                });
            }
            by_slug.insert(slug, ProjectIndex(i));
        }
        Ok(Self { projects, by_slug })
    }

    /// Parse a JSON array of project records.
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        let projects: Vec<Project> = serde_json::from_str(json)?;
        Ok(Self::new(projects)?)
    }

    /// Load a JSON array of project records from disk.
    pub fn load(path: &Path) -> Result<Self, FolioError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), projects = catalog.len(), "loaded project catalog");
        Ok(catalog)
    }

    /// Find a project by slug.
    pub fn resolve(&self, slug: &Slug) -> Option<(ProjectIndex, &Project)> {
        let index = *self.by_slug.get(slug)?;
        Some((index, &self.projects[index.0]))
    }

    /// Find a project by raw slug text, as it arrives from a URL fragment.
    pub fn resolve_str(&self, slug: &str) -> Option<(ProjectIndex, &Project)> {
        let slug = Slug::parse(slug).ok()?;
        self.resolve(&slug)
    }

    /// Project at `index`, if in range.
    pub fn get(&self, index: ProjectIndex) -> Option<&Project> {
        self.projects.get(index.0)
    }

    /// Projects in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the catalog has no projects.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
