//! Focus trap for the open modal.
//!
//! Tab and Shift+Tab wrap around the modal's focusable elements. When focus
//! has somehow escaped the modal, the next Tab pulls it back in.

/// Decide where Tab should move focus.
///
/// Returns the index in `focusables` to focus explicitly, or `None` when the
/// browser's default tab movement already stays inside the modal.
/// `focusables` must be non-empty for a `Some` result.
pub fn trap_target<E: PartialEq>(
    focusables: &[E],
    active: Option<&E>,
    backwards: bool,
) -> Option<usize> {
    let last = focusables.len().checked_sub(1)?;
    let position = active.and_then(|a| focusables.iter().position(|e| e == a));

    match position {
        None if backwards => Some(last),
        None => Some(0),
        Some(0) if backwards => Some(last),
        Some(i) if !backwards && i == last => Some(0),
        Some(_) => None,
    }
}
