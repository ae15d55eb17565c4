//! Domain types shared across the crate.

pub mod error;
pub mod key_action;

pub use error::{AppError, SourceError};
pub use key_action::KeyAction;
