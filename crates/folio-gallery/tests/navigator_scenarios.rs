//! # Navigator Scenario Tests
//!
//! Drives the navigator with event sequences against a recording view port
//! and asserts on state, rendered output, focus, and the URL fragment.

mod common;

use common::{navigator, Painted, PANEL};
use folio_core::{ProjectIndex, Slug};
use folio_gallery::{
    ClickTarget, EventOutcome, Key, KeyPress, NavEvent, NavigatorError, NavigatorState,
};

fn slug(s: &str) -> Slug {
    Slug::parse(s).unwrap()
}

// ── open / close ─────────────────────────────────────────────────────

#[test]
fn open_wraps_initial_slide_and_writes_fragment() {
    let mut nav = navigator();
    nav.open(&Slug::from_title("My Cool App!"), 5).unwrap();

    assert_eq!(
        nav.state(),
        NavigatorState::Open {
            project: ProjectIndex(0),
            slide: Some(2),
        }
    );
    assert_eq!(nav.view().fragment.as_deref(), Some("#project=my-cool-app&slide=2"));
}

#[test]
fn open_reveals_modal_renders_details_and_moves_focus() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 0).unwrap();

    let view = nav.view();
    assert!(view.modal_visible);
    assert!(view.scroll_locked);
    assert_eq!(view.active.as_deref(), Some(PANEL));
    assert_eq!(view.title.as_deref(), Some("Four Shots"));
    assert_eq!(view.tech, ["Rust", "Axum"]);
    assert_eq!(view.description.as_deref(), Some("Four Shots in one line"));
    assert!(view.repo_url.is_some());
    assert_eq!(
        view.painted,
        Some(Painted::Image {
            index: 0,
            src: "/img/0.png".to_string(),
            caption: Some("caption 0".to_string()),
        })
    );
}

#[test]
fn open_unknown_slug_is_an_error_and_changes_nothing() {
    let mut nav = navigator();
    let err = nav.open(&slug("missing"), 0).unwrap_err();
    assert_eq!(err, NavigatorError::UnknownProject("missing".to_string()));
    assert_eq!(nav.state(), NavigatorState::Closed);
    assert!(!nav.view().modal_visible);
    assert_eq!(nav.view().fragment_writes, 0);
}

#[test]
fn close_clears_fragment_and_restores_focus() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 1).unwrap();
    assert!(nav.close());

    let view = nav.view();
    assert_eq!(nav.state(), NavigatorState::Closed);
    assert!(!view.modal_visible);
    assert!(!view.scroll_locked);
    assert_eq!(view.fragment, None);
    assert_eq!(view.active.as_deref(), Some("card-0"));
    assert_eq!(nav.current_slide(), None);
}

#[test]
fn close_skips_focus_restore_for_detached_element() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 1).unwrap();
    nav.view_mut().detached.push("card-0".to_string());
    nav.close();
    assert_eq!(nav.view().active.as_deref(), Some(PANEL));
}

#[test]
fn close_when_closed_is_a_no_op() {
    let mut nav = navigator();
    assert!(!nav.close());
    assert_eq!(nav.handle(NavEvent::Close), EventOutcome::Ignored);
    assert_eq!(nav.view().fragment_writes, 0);
}

#[test]
fn reopening_while_open_keeps_first_focus_target() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 0).unwrap();
    nav.open(&slug("solo"), 0).unwrap();
    nav.close();
    assert_eq!(nav.view().active.as_deref(), Some("card-0"));
}

// ── slides ───────────────────────────────────────────────────────────

#[test]
fn set_slide_wraps_negative_indices() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 0).unwrap();
    nav.set_slide(-1, true);
    assert_eq!(nav.current_slide(), Some(3));
    assert_eq!(nav.view().fragment.as_deref(), Some("#project=four-shots&slide=3"));
}

#[test]
fn set_slide_without_url_update_leaves_fragment() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 0).unwrap();
    let writes = nav.view().fragment_writes;
    nav.set_slide(2, false);
    assert_eq!(nav.current_slide(), Some(2));
    assert_eq!(nav.view().fragment_writes, writes);
    assert_eq!(nav.view().fragment.as_deref(), Some("#project=four-shots&slide=0"));
}

#[test]
fn empty_gallery_shows_placeholder_without_slide() {
    let mut nav = navigator();
    nav.open(&slug("no-pictures"), 7).unwrap();
    assert_eq!(
        nav.state(),
        NavigatorState::Open {
            project: ProjectIndex(2),
            slide: None,
        }
    );
    assert_eq!(nav.view().painted, Some(Painted::Placeholder));
    assert_eq!(nav.view().fragment.as_deref(), Some("#project=no-pictures&slide=0"));

    nav.set_slide(-4, true);
    assert_eq!(nav.current_slide(), None);
    assert_eq!(nav.view().painted, Some(Painted::Placeholder));
}

#[test]
fn missing_caption_is_hidden() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 1).unwrap();
    assert_eq!(
        nav.view().painted,
        Some(Painted::Image {
            index: 1,
            src: "/img/1.png".to_string(),
            caption: None,
        })
    );
}

#[test]
fn neighbours_are_preloaded() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 0).unwrap();
    assert_eq!(nav.view().preloaded, ["/img/1.png", "/img/3.png"]);
}

#[test]
fn set_slide_while_closed_does_nothing() {
    let mut nav = navigator();
    nav.set_slide(3, true);
    assert_eq!(nav.state(), NavigatorState::Closed);
    assert_eq!(nav.view().painted, None);
}

// ── thumbnails ───────────────────────────────────────────────────────

#[test]
fn single_image_has_no_thumbnail_strip() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    assert!(nav.view().thumbnails.is_empty());
    assert!(nav.view().preloaded.is_empty());
}

#[test]
fn thumbnail_strip_is_capped_at_five() {
    let mut nav = navigator();
    nav.open(&slug("big-gallery"), 6).unwrap();
    assert_eq!(nav.view().thumbnails, [0, 1, 2, 3, 4]);
    assert_eq!(nav.view().highlighted, None);
    assert_eq!(nav.current_slide(), Some(6));
}

#[test]
fn thumbnail_click_jumps_and_updates_fragment() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 0).unwrap();
    assert_eq!(nav.handle(NavEvent::ThumbnailClicked(2)), EventOutcome::Consumed);
    assert_eq!(nav.current_slide(), Some(2));
    assert_eq!(nav.view().highlighted, Some(2));
    assert_eq!(nav.view().fragment.as_deref(), Some("#project=four-shots&slide=2"));
}

#[test]
fn thumbnail_click_out_of_range_is_ignored() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 0).unwrap();
    assert_eq!(nav.handle(NavEvent::ThumbnailClicked(4)), EventOutcome::Ignored);
    assert_eq!(nav.current_slide(), Some(0));
}

// ── keyboard ─────────────────────────────────────────────────────────

#[test]
fn arrow_keys_step_and_wrap() {
    let mut nav = navigator();
    nav.open(&slug("my-cool-app"), 0).unwrap();

    let left = nav.handle(NavEvent::Key(KeyPress::new(Key::ArrowLeft)));
    assert!(left.is_consumed());
    assert_eq!(nav.current_slide(), Some(2));

    nav.handle(NavEvent::Key(KeyPress::new(Key::ArrowRight)));
    assert_eq!(nav.current_slide(), Some(0));
    assert_eq!(nav.view().fragment.as_deref(), Some("#project=my-cool-app&slide=0"));
}

#[test]
fn arrow_keys_ignored_for_single_image() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    assert_eq!(
        nav.handle(NavEvent::Key(KeyPress::new(Key::ArrowRight))),
        EventOutcome::Ignored
    );
    assert_eq!(nav.current_slide(), Some(0));
}

#[test]
fn escape_closes() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    assert!(nav.handle(NavEvent::Key(KeyPress::new(Key::Escape))).is_consumed());
    assert!(!nav.is_open());
}

#[test]
fn keys_ignored_while_closed() {
    let mut nav = navigator();
    for key in [Key::ArrowLeft, Key::ArrowRight, Key::Escape, Key::Tab] {
        assert_eq!(nav.handle(NavEvent::Key(KeyPress::new(key))), EventOutcome::Ignored);
    }
    assert_eq!(nav.view().active.as_deref(), Some("card-0"));
}

#[test]
fn tab_wraps_inside_modal() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    nav.view_mut().active = Some("repo-link".to_string());

    assert!(nav.handle(NavEvent::Key(KeyPress::new(Key::Tab))).is_consumed());
    assert_eq!(nav.view().active.as_deref(), Some("close"));

    assert!(nav.handle(NavEvent::Key(KeyPress::shifted(Key::Tab))).is_consumed());
    assert_eq!(nav.view().active.as_deref(), Some("repo-link"));
}

#[test]
fn tab_between_inner_elements_uses_default_movement() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    nav.view_mut().active = Some("close".to_string());
    assert_eq!(
        nav.handle(NavEvent::Key(KeyPress::new(Key::Tab))),
        EventOutcome::Ignored
    );
}

#[test]
fn tab_from_panel_enters_focus_cycle() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    assert_eq!(nav.view().active.as_deref(), Some(PANEL));
    nav.handle(NavEvent::Key(KeyPress::new(Key::Tab)));
    assert_eq!(nav.view().active.as_deref(), Some("close"));
}

#[test]
fn tab_with_no_focusables_keeps_focus_on_panel() {
    let mut nav = navigator();
    nav.view_mut().modal_focusables.clear();
    nav.open(&slug("solo"), 0).unwrap();
    nav.view_mut().active = Some("elsewhere".to_string());
    assert!(nav.handle(NavEvent::Key(KeyPress::new(Key::Tab))).is_consumed());
    assert_eq!(nav.view().active.as_deref(), Some(PANEL));
}

// ── pointer / touch ──────────────────────────────────────────────────

#[test]
fn leftward_drag_retreats_one_slide() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 1).unwrap();
    nav.handle(NavEvent::PointerDown { x: 400.0 });
    let outcome = nav.handle(NavEvent::PointerUp { x: 320.0 });
    assert!(outcome.is_consumed());
    assert_eq!(nav.current_slide(), Some(0));
    assert_eq!(nav.view().fragment.as_deref(), Some("#project=four-shots&slide=0"));
}

#[test]
fn rightward_drag_advances_one_slide() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 3).unwrap();
    nav.handle(NavEvent::PointerDown { x: 10.0 });
    nav.handle(NavEvent::PointerUp { x: 90.0 });
    assert_eq!(nav.current_slide(), Some(0));
}

#[test]
fn short_drag_is_ignored() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 1).unwrap();
    nav.handle(NavEvent::PointerDown { x: 100.0 });
    assert_eq!(nav.handle(NavEvent::PointerUp { x: 60.0 }), EventOutcome::Ignored);
    assert_eq!(nav.current_slide(), Some(1));
}

#[test]
fn drag_on_single_image_is_ignored() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    nav.handle(NavEvent::PointerDown { x: 300.0 });
    assert_eq!(nav.handle(NavEvent::PointerUp { x: 0.0 }), EventOutcome::Ignored);
}

#[test]
fn drag_started_before_close_does_not_leak_into_next_open() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 1).unwrap();
    nav.handle(NavEvent::PointerDown { x: 400.0 });
    nav.close();
    nav.open(&slug("four-shots"), 1).unwrap();
    assert_eq!(nav.handle(NavEvent::PointerUp { x: 100.0 }), EventOutcome::Ignored);
    assert_eq!(nav.current_slide(), Some(1));
}

// ── clicks ───────────────────────────────────────────────────────────

#[test]
fn backdrop_click_closes_panel_click_does_not() {
    let mut nav = navigator();
    nav.open(&slug("solo"), 0).unwrap();
    assert_eq!(nav.handle(NavEvent::Click(ClickTarget::Panel)), EventOutcome::Ignored);
    assert!(nav.is_open());
    assert!(nav.handle(NavEvent::Click(ClickTarget::Backdrop)).is_consumed());
    assert!(!nav.is_open());
}

#[test]
fn open_event_for_unknown_slug_is_ignored() {
    let mut nav = navigator();
    let outcome = nav.handle(NavEvent::Open {
        slug: slug("nope"),
        slide: 0,
    });
    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(!nav.is_open());
}

// ── image failures ───────────────────────────────────────────────────

#[test]
fn failed_image_is_replaced_by_placeholder() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 2).unwrap();
    let outcome = nav.handle(NavEvent::ImageFailed {
        src: "/img/2.png".to_string(),
    });
    assert!(outcome.is_consumed());
    assert_eq!(nav.view().painted, Some(Painted::Placeholder));
    assert_eq!(nav.current_slide(), Some(2));
    assert!(nav.is_open());
}

#[test]
fn stale_image_failure_is_ignored() {
    let mut nav = navigator();
    nav.open(&slug("four-shots"), 2).unwrap();
    nav.set_slide(3, true);
    let outcome = nav.handle(NavEvent::ImageFailed {
        src: "/img/2.png".to_string(),
    });
    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(matches!(nav.view().painted, Some(Painted::Image { index: 3, .. })));
}
