//! hxv — paged hex viewer
//!
//! TUI application for inspecting large binary files as offset/hex/ASCII
//! lines. Content is fetched from a [`source::ByteSource`] in fixed-size
//! pages, on demand, as the user scrolls toward the end of what has
//! already been loaded.
//!
//! The crate follows a Pure Core / Impure Shell split: `session`, `render`
//! and `state` are pure and synchronously testable; `view` owns the
//! terminal and the event loop; `source` owns the I/O.

pub mod config;
pub mod logging;
pub mod model;
pub mod render;
pub mod session;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;
