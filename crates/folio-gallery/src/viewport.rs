//! # View-Port Capability
//!
//! Everything the navigator needs from the page, and nothing more. A browser
//! host implements [`ViewPort`] over the DOM (modal element, `history`,
//! `document.activeElement`, image elements); tests implement it over plain
//! vectors. The navigator never touches a UI toolkit directly.
//!
//! Required mount points (image area, caption, thumbnail strip, title, tech
//! list, description, links, close control) are assumed to exist once a
//! view port is constructed. A missing mount point is an integration bug in
//! the host, not a runtime condition the navigator recovers from.

use folio_core::Fragment;

/// Inline SVG shown when a project has no images or an image fails to load.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='800' height='500'><rect width='100%' height='100%' fill='%23E0E0E0'/><text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' fill='%231A1A1A' font-family='Inter' font-size='20'>Image unavailable</text></svg>";

/// Detail panel content for the open project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectDetails<'a> {
    pub title: &'a str,
    pub tech: &'a [String],
    /// Long description when present, otherwise the short one.
    pub description: &'a str,
    pub repo_url: Option<&'a str>,
}

/// What the carousel's image area should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideView<'a> {
    /// A real image. The caption element is hidden when `caption` is `None`.
    Image {
        index: usize,
        src: &'a str,
        alt: &'a str,
        caption: Option<&'a str>,
    },
    /// [`PLACEHOLDER_IMAGE`] with the caption hidden.
    Placeholder,
}

/// One entry of the thumbnail strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumbnail<'a> {
    pub index: usize,
    pub src: &'a str,
    pub alt: &'a str,
}

/// Page capabilities the navigator drives.
pub trait ViewPort {
    /// Handle to a focusable element on the page.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Reveal the modal and suspend page scrolling.
    fn show_modal(&mut self);

    /// Hide the modal and restore page scrolling.
    fn hide_modal(&mut self);

    /// The element that currently has keyboard focus.
    fn active_element(&self) -> Option<Self::Element>;

    /// Whether `element` is still part of the page.
    fn is_attached(&self, element: &Self::Element) -> bool;

    fn focus(&mut self, element: &Self::Element);

    /// Move focus to the modal's content panel.
    fn focus_panel(&mut self);

    /// Visible, enabled focusable elements inside the modal, in tab order.
    fn focusables(&self) -> Vec<Self::Element>;

    /// Replace the current history entry's fragment. `None` restores the
    /// path and query without any fragment.
    fn set_fragment(&mut self, fragment: Option<&Fragment>);

    fn render_details(&mut self, details: &ProjectDetails<'_>);

    fn render_slide(&mut self, slide: &SlideView<'_>);

    /// Rebuild the thumbnail strip. An empty slice hides the strip.
    fn render_thumbnails(&mut self, thumbnails: &[Thumbnail<'_>]);

    /// Mark the selected thumbnail, or clear the selection.
    fn highlight_thumbnail(&mut self, index: Option<usize>);

    /// Start fetching an image in the background so a later slide change
    /// paints without delay. Fire-and-forget.
    fn preload(&mut self, src: &str);
}
