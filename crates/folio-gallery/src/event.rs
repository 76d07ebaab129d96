//! # Navigator Events
//!
//! Every input the page can deliver to the gallery is a [`NavEvent`]. The
//! host translates DOM events (click, keydown, touchstart/touchend,
//! mousedown/mouseup, image `error`, `hashchange`) into these and feeds them
//! to [`Navigator::handle`](crate::Navigator::handle).

use folio_core::Slug;

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Tab,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => Self::Other,
        }
    }
}

/// A key press with the modifier state the navigator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// Where a click inside the modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// The dimmed area around the content panel.
    Backdrop,
    /// Anywhere inside the content panel.
    Panel,
}

/// Input to the navigator state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// A project card was activated.
    Open { slug: Slug, slide: i64 },
    /// The close control was activated.
    Close,
    /// Programmatic slide change.
    SetSlide { index: i64, update_url: bool },
    Key(KeyPress),
    /// Mouse button or touch pressed on the carousel viewport.
    PointerDown { x: f64 },
    /// Mouse button or touch released on the carousel viewport.
    PointerUp { x: f64 },
    Click(ClickTarget),
    ThumbnailClicked(usize),
    /// The image at `src` failed to load.
    ImageFailed { src: String },
    /// The URL fragment changed outside the navigator (address bar edit,
    /// back/forward). Carries the raw fragment, with or without `#`.
    FragmentChanged(String),
}

/// Whether the navigator acted on an event.
///
/// `Consumed` tells the host to suppress the browser's default action
/// (`preventDefault`), which matters for arrow keys and Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Consumed,
    Ignored,
}

impl EventOutcome {
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}
