//! Domain-level keyboard actions.
//!
//! Key events are translated to `KeyAction` values by the configured
//! [`crate::config::keybindings::KeyBindings`] map; handlers only ever see
//! actions, never raw key codes.

/// Actions the user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Scroll up by one line.
    ScrollUp,
    /// Scroll down by one line.
    ScrollDown,
    /// Scroll up by one viewport height.
    PageUp,
    /// Scroll down by one viewport height.
    PageDown,
    /// Jump to the first line.
    ScrollToTop,
    /// Jump to the last loaded line.
    ScrollToBottom,
    /// Re-open the current source from scratch (full session reset).
    Reload,
    /// Toggle the help overlay.
    Help,
    /// Quit the application.
    Quit,
}
