//! Shared fixtures for navigator integration tests.

#![allow(dead_code)]

use folio_core::{Catalog, Fragment, Project, ProjectImage};
use folio_gallery::{Navigator, ProjectDetails, SlideView, Thumbnail, ViewPort};

pub const PANEL: &str = "modal-panel";

/// What the image area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Painted {
    Image {
        index: usize,
        src: String,
        caption: Option<String>,
    },
    Placeholder,
}

/// In-memory page that records everything the navigator asks of it.
#[derive(Debug, Default)]
pub struct RecordingViewPort {
    pub modal_visible: bool,
    pub scroll_locked: bool,
    pub active: Option<String>,
    pub detached: Vec<String>,
    pub modal_focusables: Vec<String>,
    pub fragment: Option<String>,
    pub fragment_writes: usize,
    pub title: Option<String>,
    pub tech: Vec<String>,
    pub description: Option<String>,
    pub repo_url: Option<String>,
    pub painted: Option<Painted>,
    pub thumbnails: Vec<usize>,
    pub highlighted: Option<usize>,
    pub preloaded: Vec<String>,
}

impl RecordingViewPort {
    pub fn with_focus(element: &str) -> Self {
        Self {
            active: Some(element.to_string()),
            modal_focusables: vec!["close".to_string(), "repo-link".to_string()],
            ..Self::default()
        }
    }
}

impl ViewPort for RecordingViewPort {
    type Element = String;

    fn show_modal(&mut self) {
        self.modal_visible = true;
        self.scroll_locked = true;
    }

    fn hide_modal(&mut self) {
        self.modal_visible = false;
        self.scroll_locked = false;
    }

    fn active_element(&self) -> Option<String> {
        self.active.clone()
    }

    fn is_attached(&self, element: &String) -> bool {
        !self.detached.contains(element)
    }

    fn focus(&mut self, element: &String) {
        self.active = Some(element.clone());
    }

    fn focus_panel(&mut self) {
        self.active = Some(PANEL.to_string());
    }

    fn focusables(&self) -> Vec<String> {
        self.modal_focusables.clone()
    }

    fn set_fragment(&mut self, fragment: Option<&Fragment>) {
        self.fragment = fragment.map(ToString::to_string);
        self.fragment_writes += 1;
    }

    fn render_details(&mut self, details: &ProjectDetails<'_>) {
        self.title = Some(details.title.to_string());
        self.tech = details.tech.to_vec();
        self.description = Some(details.description.to_string());
        self.repo_url = details.repo_url.map(str::to_string);
    }

    fn render_slide(&mut self, slide: &SlideView<'_>) {
        self.painted = Some(match *slide {
            SlideView::Image {
                index,
                src,
                caption,
                ..
            } => Painted::Image {
                index,
                src: src.to_string(),
                caption: caption.map(str::to_string),
            },
            SlideView::Placeholder => Painted::Placeholder,
        });
    }

    fn render_thumbnails(&mut self, thumbnails: &[Thumbnail<'_>]) {
        self.thumbnails = thumbnails.iter().map(|t| t.index).collect();
    }

    fn highlight_thumbnail(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    fn preload(&mut self, src: &str) {
        self.preloaded.push(src.to_string());
    }
}

pub fn image(n: usize) -> ProjectImage {
    ProjectImage {
        src: format!("/img/{n}.png"),
        alt: Some(format!("screenshot {n}")),
        caption: (n % 2 == 0).then(|| format!("caption {n}")),
    }
}

pub fn project(title: &str, images: usize) -> Project {
    Project {
        title: title.to_string(),
        description: format!("{title} in one line"),
        long_description: None,
        tech: vec!["Rust".to_string(), "Axum".to_string()],
        repo_url: Some(format!("https://github.com/example/{}", title.len())),
        images: (0..images).map(image).collect(),
    }
}

/// Catalog: "My Cool App!" (3 images), "Four Shots" (4), "No Pictures" (0),
/// "Solo" (1), "Big Gallery" (8).
pub fn catalog() -> Catalog {
    Catalog::new(vec![
        project("My Cool App!", 3),
        project("Four Shots", 4),
        project("No Pictures", 0),
        project("Solo", 1),
        project("Big Gallery", 8),
    ])
    .unwrap()
}

pub fn navigator() -> Navigator<RecordingViewPort> {
    Navigator::new(catalog(), RecordingViewPort::with_focus("card-0"))
}
