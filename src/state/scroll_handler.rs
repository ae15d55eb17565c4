//! Vertical scrolling keyboard action handler.
//!
//! Pure function that transforms AppState in response to scroll actions.
//! Clamping keeps the top line within the rendered content; the near-end
//! check in the view layer (not here) decides whether more content should
//! be fetched.

use crate::model::KeyAction;
use crate::state::AppState;

/// Handle a scroll keyboard action.
///
/// `viewport_height` is the number of visible display lines,
/// `content_height` the number of rendered lines. Non-scroll actions are
/// no-ops. Returns the new state.
pub fn handle_scroll_action(
    mut state: AppState,
    action: KeyAction,
    viewport_height: usize,
    content_height: usize,
) -> AppState {
    let max_offset = content_height.saturating_sub(viewport_height);
    let offset = state.scroll.vertical_offset;

    let new_offset = match action {
        KeyAction::ScrollUp => offset.saturating_sub(1),
        KeyAction::ScrollDown => offset.saturating_add(1).min(max_offset),
        KeyAction::PageUp => offset.saturating_sub(viewport_height),
        KeyAction::PageDown => offset.saturating_add(viewport_height).min(max_offset),
        KeyAction::ScrollToTop => 0,
        KeyAction::ScrollToBottom => max_offset,
        _ => return state,
    };

    state.scroll.vertical_offset = new_offset;
    state
}

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
