//! Application state and pure transition handlers.

pub mod scroll_handler;
pub mod viewport;

pub use scroll_handler::handle_scroll_action;
pub use viewport::near_end;

use crate::session::Session;

/// Scroll state for the hex pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Index of the display line at the top of the viewport.
    pub vertical_offset: usize,
}

/// Root application state. Pure data, no side effects.
///
/// The session is the domain model; everything else is UI state. State
/// transitions are pure functions (see [`scroll_handler`]) so they are
/// testable without a terminal.
#[derive(Debug)]
pub struct AppState {
    /// The open source's session: page cache and fetch status.
    pub session: Session,
    /// Scroll position within the rendered lines.
    pub scroll: ScrollState,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
}

impl AppState {
    /// Create state around a fresh session.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            scroll: ScrollState::default(),
            help_visible: false,
        }
    }
}
