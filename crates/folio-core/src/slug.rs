//! # Project Slugs
//!
//! A [`Slug`] is the URL-safe identifier of a project, derived from its title.
//! Derivation is pure: lower-case the title, collapse every run of characters
//! outside `[a-z0-9]` into one hyphen, and trim hyphens from both ends.
//!
//! ```text
//! "My Cool App!"   -> "my-cool-app"
//! "  --Rust  CLI"  -> "rust-cli"
//! "!!!"            -> "project"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Slug used when a title is empty or contains no alphanumeric characters.
pub const FALLBACK_SLUG: &str = "project";

/// URL-safe project identifier.
///
/// Always canonical: non-empty, only `[a-z0-9-]`, no leading, trailing, or
/// doubled hyphens. Construct with [`Slug::from_title`] or [`Slug::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Derive the slug for a project title.
    pub fn from_title(title: &str) -> Self {
        let mut out = String::with_capacity(title.len());
        let mut pending_hyphen = false;

        for ch in title.chars().flat_map(char::to_lowercase) {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(ch);
            } else {
                pending_hyphen = true;
            }
        }

        if out.is_empty() {
            return Self(FALLBACK_SLUG.to_string());
        }
        Self(out)
    }

    /// Accept a string that is already a canonical slug.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSlug`] if `s` is not canonical.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if is_canonical(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::InvalidSlug(s.to_string()))
        }
    }

    /// The slug text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_canonical(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_canonical(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidSlug(value))
        }
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
