//! Near-end detection for the scrolling viewport.
//!
//! Translates scroll-position samples into the "need next page" signal.
//! The signal is allowed to fire spuriously (while a fetch is in flight,
//! or with everything loaded); the fetch controller's own gates make
//! those cases no-ops, so this stays a pure predicate.

/// Default margin, in display lines, at which the next page is prefetched.
pub const DEFAULT_NEAR_END_MARGIN: usize = 10;

/// Whether the viewport is close enough to the bottom of rendered content
/// to warrant prefetching the next page.
///
/// Fires when `scroll_offset + visible_height >= content_height - margin`
/// (saturating). Must be re-evaluated on every scroll-position change.
pub fn near_end(
    scroll_offset: usize,
    visible_height: usize,
    content_height: usize,
    margin: usize,
) -> bool {
    scroll_offset.saturating_add(visible_height) >= content_height.saturating_sub(margin)
}
