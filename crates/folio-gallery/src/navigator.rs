//! # Gallery Navigator State Machine
//!
//! Owns the transient "which project is open, which slide is showing" state
//! of the project modal and keeps it in sync with the URL fragment.
//!
//! ## States
//!
//! ```text
//!            open(p, i)                       set_slide(j)
//! Closed ───────────────▶ Open(p, i mod n) ◀───────────────┐
//!   ▲                        │   │                          │
//!   │        close()         │   └──────────────────────────┘
//!   └────────────────────────┘
//!
//! fragment changed:  known slug   ─▶ Open(p', slide')
//!                    cleared      ─▶ Closed
//!                    unknown slug ─▶ (no change)
//!                    malformed    ─▶ (no change)
//! ```
//!
//! There is no terminal state; the navigator lives for one page session.
//!
//! ## Design Decision
//!
//! A runtime enum rather than typestate: transitions are triggered by
//! user input arriving in arbitrary order (a stray Escape while closed, a
//! late image error after the slide moved on), so every event must be
//! accepted in every state and resolved to "act" or "ignore".

use folio_core::{Catalog, Fragment, Project, ProjectIndex, Slug};
use thiserror::Error;

use crate::event::{ClickTarget, EventOutcome, Key, KeyPress, NavEvent};
use crate::focus::trap_target;
use crate::gesture::DragTracker;
use crate::viewport::{ProjectDetails, SlideView, Thumbnail, ViewPort};

/// The thumbnail strip shows at most this many images.
pub const MAX_THUMBNAILS: usize = 5;

// ─── State ───────────────────────────────────────────────────────────

/// Navigator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigatorState {
    #[default]
    Closed,
    /// `slide` is `None` exactly when the project has no images.
    Open {
        project: ProjectIndex,
        slide: Option<usize>,
    },
}

impl NavigatorState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

impl std::fmt::Display for NavigatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open {
                project,
                slide: Some(slide),
            } => write!(f, "OPEN({}, {slide})", project.0),
            Self::Open {
                project,
                slide: None,
            } => write!(f, "OPEN({}, placeholder)", project.0),
        }
    }
}

/// Errors from programmatic navigator calls.
///
/// Event-driven paths never return these; they ignore unresolvable input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("no project with slug \"{0}\"")]
    UnknownProject(String),
}

/// Wrap `index` into `[0, count)`. `None` when there is nothing to wrap into.
///
/// Equivalent to `((index % count) + count) % count`.
pub fn wrap_slide(index: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let n = i64::try_from(count).unwrap_or(i64::MAX);
    usize::try_from(index.rem_euclid(n)).ok()
}

// ─── Navigator ───────────────────────────────────────────────────────

/// Gallery/modal navigator bound to a project catalog and a view port.
#[derive(Debug)]
pub struct Navigator<V: ViewPort> {
    catalog: Catalog,
    view: V,
    state: NavigatorState,
    last_focused: Option<V::Element>,
    drag: DragTracker,
    /// Source of the image currently painted, for matching load failures.
    displayed_src: Option<String>,
    /// Fragment text currently in the address bar, as far as the navigator knows.
    fragment: Option<String>,
}

impl<V: ViewPort> Navigator<V> {
    /// Create a closed navigator.
    pub fn new(catalog: Catalog, view: V) -> Self {
        Self {
            catalog,
            view,
            state: NavigatorState::Closed,
            last_focused: None,
            drag: DragTracker::default(),
            displayed_src: None,
            fragment: None,
        }
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The open project, if any.
    pub fn current_project(&self) -> Option<&Project> {
        match self.state {
            NavigatorState::Open { project, .. } => self.catalog.get(project),
            NavigatorState::Closed => None,
        }
    }

    /// The displayed slide, if a project with images is open.
    pub fn current_slide(&self) -> Option<usize> {
        match self.state {
            NavigatorState::Open { slide, .. } => slide,
            NavigatorState::Closed => None,
        }
    }

    /// The fragment that encodes the current state, if open.
    pub fn current_fragment(&self) -> Option<Fragment> {
        let NavigatorState::Open { project, slide } = self.state else {
            return None;
        };
        let project = self.catalog.get(project)?;
        Some(Fragment::new(&project.slug(), slide.unwrap_or(0)))
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Open the project named by `slug` at `initial_slide` (wrapped into range).
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorError::UnknownProject`] if the slug is not in the catalog.
    pub fn open(&mut self, slug: &Slug, initial_slide: i64) -> Result<(), NavigatorError> {
        let (index, _) = self
            .catalog
            .resolve(slug)
            .ok_or_else(|| NavigatorError::UnknownProject(slug.to_string()))?;
        self.open_index(index, initial_slide);
        Ok(())
    }

    /// Close the modal. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }

        self.view.hide_modal();
        self.view.set_fragment(None);
        self.fragment = None;

        if let Some(element) = self.last_focused.take() {
            if self.view.is_attached(&element) {
                self.view.focus(&element);
            } else {
                tracing::debug!(?element, "previously focused element detached, not restoring focus");
            }
        }

        tracing::debug!(from = %self.state, "gallery closed");
        self.state = NavigatorState::Closed;
        self.drag.cancel();
        self.displayed_src = None;
        true
    }

    /// Show slide `index` (wrapped into range) of the open project.
    ///
    /// No-op while closed. With `update_url` the fragment is rewritten.
    pub fn set_slide(&mut self, index: i64, update_url: bool) {
        if !self.state.is_open() {
            return;
        }
        self.apply_slide(index);
        if update_url {
            self.sync_fragment();
        }
    }

    /// Feed one input event through the state machine.
    pub fn handle(&mut self, event: NavEvent) -> EventOutcome {
        match event {
            NavEvent::Open { slug, slide } => match self.open(&slug, slide) {
                Ok(()) => EventOutcome::Consumed,
                Err(err) => {
                    tracing::warn!(error = %err, "open request ignored");
                    EventOutcome::Ignored
                }
            },
            NavEvent::Close => outcome(self.close()),
            NavEvent::SetSlide { index, update_url } => {
                let open = self.state.is_open();
                self.set_slide(index, update_url);
                outcome(open)
            }
            NavEvent::Key(press) => self.on_key(press),
            NavEvent::PointerDown { x } => {
                if self.state.is_open() {
                    self.drag.press(x);
                }
                EventOutcome::Ignored
            }
            NavEvent::PointerUp { x } => self.on_pointer_up(x),
            NavEvent::Click(ClickTarget::Backdrop) => outcome(self.close()),
            NavEvent::Click(ClickTarget::Panel) => EventOutcome::Ignored,
            NavEvent::ThumbnailClicked(index) => self.on_thumbnail(index),
            NavEvent::ImageFailed { src } => self.on_image_failed(&src),
            NavEvent::FragmentChanged(raw) => self.on_fragment_changed(&raw),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn open_index(&mut self, index: ProjectIndex, initial_slide: i64) {
        let Some(project) = self.catalog.get(index) else {
            return;
        };
        let was_closed = !self.state.is_open();
        if was_closed {
            self.last_focused = self.view.active_element();
        }

        self.view.render_details(&ProjectDetails {
            title: &project.title,
            tech: &project.tech,
            description: project.detail_text(),
            repo_url: project.repo_url.as_deref(),
        });

        let thumbnails: Vec<Thumbnail<'_>> = if project.images.len() > 1 {
            project
                .images
                .iter()
                .take(MAX_THUMBNAILS)
                .enumerate()
                .map(|(index, image)| Thumbnail {
                    index,
                    src: &image.src,
                    alt: image.alt.as_deref().unwrap_or(""),
                })
                .collect()
        } else {
            Vec::new()
        };
        self.view.render_thumbnails(&thumbnails);

        self.state = NavigatorState::Open {
            project: index,
            slide: None,
        };
        self.drag.cancel();
        self.apply_slide(initial_slide);

        if was_closed {
            self.view.show_modal();
        }
        self.view.focus_panel();
        self.sync_fragment();

        tracing::debug!(state = %self.state, "gallery opened");
    }

    /// Render slide `requested` of the open project and record it in state.
    fn apply_slide(&mut self, requested: i64) {
        let NavigatorState::Open { project, .. } = self.state else {
            return;
        };
        let Some(p) = self.catalog.get(project) else {
            return;
        };
        let count = p.images.len();

        let Some(slide) = wrap_slide(requested, count) else {
            self.view.render_slide(&SlideView::Placeholder);
            self.displayed_src = None;
            self.state = NavigatorState::Open {
                project,
                slide: None,
            };
            return;
        };

        let image = &p.images[slide];
        self.view.render_slide(&SlideView::Image {
            index: slide,
            src: &image.src,
            alt: image.alt.as_deref().unwrap_or(""),
            caption: image.caption.as_deref().filter(|c| !c.is_empty()),
        });

        if count > 1 {
            let selected = (slide < MAX_THUMBNAILS).then_some(slide);
            self.view.highlight_thumbnail(selected);

            let next = (slide + 1) % count;
            let prev = (slide + count - 1) % count;
            self.view.preload(&p.images[next].src);
            if prev != next {
                self.view.preload(&p.images[prev].src);
            }
        }

        self.displayed_src = Some(image.src.clone());
        self.state = NavigatorState::Open {
            project,
            slide: Some(slide),
        };
    }

    /// Write the fragment for the current state unless the address bar
    /// already shows it.
    fn sync_fragment(&mut self) {
        let Some(fragment) = self.current_fragment() else {
            return;
        };
        let rendered = fragment.to_string();
        if self.fragment.as_deref() != Some(rendered.as_str()) {
            self.view.set_fragment(Some(&fragment));
            self.fragment = Some(rendered);
        }
    }

    fn image_count(&self) -> usize {
        self.current_project().map_or(0, Project::image_count)
    }

    fn step_slide(&mut self, step: i64) {
        let current = self.current_slide().unwrap_or(0);
        let target = i64::try_from(current).unwrap_or(0).saturating_add(step);
        self.set_slide(target, true);
    }

    // ── Event handlers ───────────────────────────────────────────────

    fn on_key(&mut self, press: KeyPress) -> EventOutcome {
        if !self.state.is_open() {
            return EventOutcome::Ignored;
        }
        match press.key {
            Key::ArrowLeft if self.image_count() > 1 => {
                self.step_slide(-1);
                EventOutcome::Consumed
            }
            Key::ArrowRight if self.image_count() > 1 => {
                self.step_slide(1);
                EventOutcome::Consumed
            }
            Key::Escape => outcome(self.close()),
            Key::Tab => self.trap_focus(press.shift),
            _ => EventOutcome::Ignored,
        }
    }

    fn trap_focus(&mut self, backwards: bool) -> EventOutcome {
        let focusables = self.view.focusables();
        if focusables.is_empty() {
            self.view.focus_panel();
            return EventOutcome::Consumed;
        }
        let active = self.view.active_element();
        match trap_target(&focusables, active.as_ref(), backwards) {
            Some(index) => {
                self.view.focus(&focusables[index]);
                EventOutcome::Consumed
            }
            None => EventOutcome::Ignored,
        }
    }

    fn on_pointer_up(&mut self, x: f64) -> EventOutcome {
        if !self.state.is_open() {
            self.drag.cancel();
            return EventOutcome::Ignored;
        }
        match self.drag.release(x) {
            Some(direction) if self.image_count() > 1 => {
                self.step_slide(direction.step());
                EventOutcome::Consumed
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn on_thumbnail(&mut self, index: usize) -> EventOutcome {
        let count = self.image_count();
        if !self.state.is_open() || count < 2 || index >= count.min(MAX_THUMBNAILS) {
            return EventOutcome::Ignored;
        }
        self.set_slide(i64::try_from(index).unwrap_or(0), true);
        EventOutcome::Consumed
    }

    fn on_image_failed(&mut self, src: &str) -> EventOutcome {
        if self.displayed_src.as_deref() != Some(src) {
            tracing::trace!(src, "stale image failure ignored");
            return EventOutcome::Ignored;
        }
        tracing::debug!(src, "image failed to load, showing placeholder");
        self.view.render_slide(&SlideView::Placeholder);
        self.displayed_src = None;
        EventOutcome::Consumed
    }

    fn on_fragment_changed(&mut self, raw: &str) -> EventOutcome {
        // The address bar holds `raw` now, even if the event is ignored.
        self.fragment = Some(if raw.starts_with('#') {
            raw.to_string()
        } else {
            format!("#{raw}")
        });

        let parsed = match Fragment::parse(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(error = %err, "malformed fragment ignored");
                return EventOutcome::Ignored;
            }
        };

        let Some(target) = parsed else {
            self.fragment = None;
            return outcome(self.close());
        };

        let Some((index, _)) = self.catalog.resolve_str(&target.project) else {
            tracing::debug!(project = %target.project, "fragment names unknown project");
            return EventOutcome::Ignored;
        };

        let slide = target.slide;
        match self.state {
            NavigatorState::Open { project, .. } if project == index => {
                self.set_slide(slide, true);
            }
            _ => self.open_index(index, slide),
        }
        EventOutcome::Consumed
    }
}

fn outcome(acted: bool) -> EventOutcome {
    if acted {
        EventOutcome::Consumed
    } else {
        EventOutcome::Ignored
    }
}
