//! # URL Fragment Codec
//!
//! The project gallery encodes "which project is open, which slide is showing"
//! in the URL fragment so the view is linkable and back/forward-navigable.
//!
//! ## Wire format
//!
//! ```text
//! #project=<url-encoded-slug>&slide=<non-negative integer>
//! ```
//!
//! Accepted on input:
//!
//! - `#project=my-app`: slide defaults to `0`.
//! - `#my-app`: no `=` or `&`, so the whole fragment is a bare slug at slide `0`.
//! - `#` or the empty string: the fragment was cleared.
//!
//! The `slide` value is read like a leading-integer prefix (`"2abc"` is 2,
//! `"-1"` is -1, `"x"` is 0). Wrapping into the image range is the
//! navigator's job, not the codec's.

use url::form_urlencoded;

use crate::error::FragmentError;
use crate::slug::Slug;

/// A decoded navigation target.
///
/// `project` is kept as raw text: a fragment typed by hand may name a slug
/// that is not canonical or not in the catalog, and that is resolved (or
/// ignored) by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    /// Slug text naming the project.
    pub project: String,
    /// Requested slide. May be negative or out of range.
    pub slide: i64,
}

impl Fragment {
    /// Build the fragment for a project and a resolved slide index.
    pub fn new(slug: &Slug, slide: usize) -> Self {
        Self {
            project: slug.as_str().to_string(),
            slide: i64::try_from(slide).unwrap_or(i64::MAX),
        }
    }

    /// Decode a fragment, with or without the leading `#`.
    ///
    /// Returns `Ok(None)` when the fragment is empty (cleared).
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingProject`] when the fragment carries
    /// key/value pairs but no non-empty `project` key.
    pub fn parse(raw: &str) -> Result<Option<Self>, FragmentError> {
        let body = raw.strip_prefix('#').unwrap_or(raw);
        if body.is_empty() {
            return Ok(None);
        }

        let query = if body.contains('=') || body.contains('&') {
            body.to_string()
        } else {
            format!("project={body}")
        };

        let mut project: Option<String> = None;
        let mut slide: Option<String> = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "project" if project.is_none() => project = Some(value.into_owned()),
                "slide" if slide.is_none() => slide = Some(value.into_owned()),
                _ => {}
            }
        }

        let project = match project {
            Some(p) if !p.is_empty() => p,
            _ => return Err(FragmentError::MissingProject(raw.to_string())),
        };
        let slide = slide.as_deref().and_then(leading_integer).unwrap_or(0);

        Ok(Some(Self { project, slide }))
    }

    /// The canonical slug this fragment names, if its text is canonical.
    pub fn slug(&self) -> Option<Slug> {
        Slug::parse(&self.project).ok()
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded: String = form_urlencoded::byte_serialize(self.project.as_bytes()).collect();
        write!(f, "#project={encoded}&slide={}", self.slide)
    }
}

/// Parse an optional sign followed by decimal digits from the start of `s`,
/// after leading whitespace. Saturates instead of overflowing.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        let d = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(d)
        } else {
            value.saturating_add(d)
        };
    }
    seen.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(project: &str, slide: i64) -> Fragment {
        Fragment {
            project: project.to_string(),
            slide,
        }
    }

    #[test]
    fn renders_wire_format() {
        let slug = Slug::from_title("My Cool App!");
        assert_eq!(Fragment::new(&slug, 2).to_string(), "#project=my-cool-app&slide=2");
    }

    #[test]
    fn parses_full_form() {
        assert_eq!(
            Fragment::parse("#project=my-cool-app&slide=2").unwrap(),
            Some(fragment("my-cool-app", 2))
        );
    }

    #[test]
    fn hash_prefix_is_optional() {
        assert_eq!(
            Fragment::parse("project=site&slide=1").unwrap(),
            Some(fragment("site", 1))
        );
    }

    #[test]
    fn missing_slide_defaults_to_zero() {
        assert_eq!(Fragment::parse("#project=site").unwrap(), Some(fragment("site", 0)));
    }

    #[test]
    fn bare_slug_is_slide_zero() {
        assert_eq!(Fragment::parse("#site").unwrap(), Some(fragment("site", 0)));
    }

    #[test]
    fn empty_fragment_is_cleared() {
        assert_eq!(Fragment::parse("").unwrap(), None);
        assert_eq!(Fragment::parse("#").unwrap(), None);
    }

    #[test]
    fn no_project_key_is_malformed() {
        assert!(matches!(
            Fragment::parse("#slide=3"),
            Err(FragmentError::MissingProject(_))
        ));
        assert!(matches!(
            Fragment::parse("#project=&slide=3"),
            Err(FragmentError::MissingProject(_))
        ));
    }

    #[test]
    fn slide_uses_leading_integer_prefix() {
        assert_eq!(Fragment::parse("#project=a&slide=7xyz").unwrap().unwrap().slide, 7);
        assert_eq!(Fragment::parse("#project=a&slide=-1").unwrap().unwrap().slide, -1);
        assert_eq!(Fragment::parse("#project=a&slide=abc").unwrap().unwrap().slide, 0);
        assert_eq!(Fragment::parse("#project=a&slide=").unwrap().unwrap().slide, 0);
    }

    #[test]
    fn huge_slide_saturates() {
        let f = Fragment::parse("#project=a&slide=99999999999999999999999").unwrap().unwrap();
        assert_eq!(f.slide, i64::MAX);
    }

    #[test]
    fn percent_encoded_project_is_decoded() {
        let f = Fragment::parse("#project=my%2Dapp&slide=0").unwrap().unwrap();
        assert_eq!(f.project, "my-app");
        assert_eq!(f.slug(), Some(Slug::parse("my-app").unwrap()));
    }

    #[test]
    fn first_occurrence_wins() {
        let f = Fragment::parse("#project=a&project=b&slide=1&slide=2").unwrap().unwrap();
        assert_eq!(f, fragment("a", 1));
    }

    #[test]
    fn non_canonical_project_has_no_slug() {
        let f = Fragment::parse("#project=Not%20A%20Slug").unwrap().unwrap();
        assert_eq!(f.project, "Not A Slug");
        assert!(f.slug().is_none());
    }
}
