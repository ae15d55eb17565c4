//! Error types for the hxv application.
//!
//! A small hierarchical taxonomy built with `thiserror`. Errors compose
//! via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`SourceError`] - Byte source failures (missing file, short read, I/O)
//!   - [`crate::config::ConfigError`] - Config file read/parse failures
//!   - `std::io::Error` - Terminal/TUI failures
//!
//! # Recovery Strategy
//!
//! Page-fetch failures are non-fatal: the fetch controller catches them,
//! records a visible error status on the session, and leaves the page
//! cache untouched so the next scroll-triggered request retries the same
//! page. Source-open and terminal errors are fatal and propagate to main.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Returned from main application logic. Domain-specific error types
/// convert automatically via `From`, enabling clean `?` propagation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open or read the byte source.
    ///
    /// Fatal when it occurs at startup (the viewer has nothing to show).
    /// During viewing, per-page read failures are intercepted by the
    /// fetch controller instead of surfacing here.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Failed to load or parse the configuration file.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer. Fatal - without a working
    /// terminal the TUI cannot function.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors produced by byte sources.
///
/// Distinguishes specific failure modes rather than collapsing them into
/// generic I/O errors, so callers can give targeted messages and decide
/// whether a retry makes sense.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested file does not exist at the given path.
    ///
    /// Occurs at startup when opening the file argument. Terminal for the
    /// session; no retry.
    #[error("File not found: {path}")]
    NotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source was provided - user must supply a file path or pipe stdin.
    ///
    /// Occurs when hxv is invoked without arguments and stdin is an
    /// interactive terminal rather than a pipe.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// A page index at or past the end of the source was requested.
    ///
    /// The fetch controller never issues such a request, so this variant
    /// signals a programming error rather than a user-facing condition.
    #[error("Page index {index} out of range (total pages: {total_pages})")]
    OutOfRange {
        /// The page index that was requested.
        index: u64,
        /// The number of pages the source actually has.
        total_pages: u64,
    },

    /// Generic I/O error reading from the source.
    ///
    /// Permission problems, disk read errors, truncation races. A single
    /// failed page read is recoverable: the page is re-requested on the
    /// next scroll signal.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_error_not_found_display() {
        let err = SourceError::NotFound {
            path: PathBuf::from("/tmp/missing.bin"),
        };
        let msg = err.to_string();
        assert!(msg.contains("File not found"));
        assert!(msg.contains("/tmp/missing.bin"));
    }

    #[test]
    fn source_error_no_input_display() {
        let msg = SourceError::NoInput.to_string();
        assert!(msg.contains("No input source"));
        assert!(msg.contains("file path or pipe data to stdin"));
    }

    #[test]
    fn source_error_out_of_range_display() {
        let err = SourceError::OutOfRange {
            index: 9,
            total_pages: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("Page index 9"));
        assert!(msg.contains("total pages: 4"));
    }

    #[test]
    fn source_error_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: SourceError = io_err.into();
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn app_error_from_source_error() {
        let app_err: AppError = SourceError::NoInput.into();
        let msg = app_err.to_string();
        assert!(msg.contains("Source error"));
        assert!(msg.contains("No input source"));
    }

    #[test]
    fn app_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe broken");
        let app_err: AppError = io_err.into();
        let msg = app_err.to_string();
        assert!(msg.contains("Terminal error"));
        assert!(msg.contains("pipe broken"));
    }

    #[test]
    fn app_error_nested_io_through_source_error() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let src_err: SourceError = io_err.into();
        let app_err: AppError = src_err.into();
        let msg = app_err.to_string();
        assert!(msg.contains("Source error"));
        assert!(msg.contains("IO error"));
        assert!(msg.contains("short read"));
    }
}
