//! # folio-gallery — Project Gallery / Modal Navigator
//!
//! The portfolio's project modal: a detail panel plus an image carousel,
//! deep-linkable through the URL fragment and navigable by keyboard,
//! pointer, and touch.
//!
//! ## Shape
//!
//! - [`Navigator`] holds the state machine (`Closed` / `Open(project, slide)`)
//!   and consumes [`NavEvent`]s through a single [`Navigator::handle`].
//! - [`ViewPort`] is the only way the navigator reaches the page: modal
//!   visibility, focus, history fragment, rendering, image preloading.
//! - Slide arithmetic ([`wrap_slide`]), the focus trap ([`focus::trap_target`])
//!   and swipe detection ([`DragTracker`]) are pure and tested on their own.
//!
//! ## Threading
//!
//! Single-threaded and event-driven: every transition runs to completion on
//! `&mut self`. Preloads are fire-and-forget and never read back, so a late
//! image load for an old slide cannot disturb newer state. A late image
//! *failure* is matched against the displayed source and dropped if stale.

pub mod event;
pub mod focus;
pub mod gesture;
pub mod navigator;
pub mod viewport;

pub use event::{ClickTarget, EventOutcome, Key, KeyPress, NavEvent};
pub use gesture::{DragTracker, SwipeDirection, SWIPE_THRESHOLD_PX};
pub use navigator::{wrap_slide, Navigator, NavigatorError, NavigatorState, MAX_THUMBNAILS};
pub use viewport::{ProjectDetails, SlideView, Thumbnail, ViewPort, PLACEHOLDER_IMAGE};
