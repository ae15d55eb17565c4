//! Byte sources.
//!
//! A [`ByteSource`] exposes a total content length and page-granular
//! reads. Two implementations are provided:
//! - [`FileSource`] for a file path argument
//! - [`MemSource`] for piped stdin (read to completion up front) and tests
//!
//! Sources are shared read-only: the fetch worker thread reads pages
//! while the UI thread queries the size, so implementations take `&self`
//! and must be `Send + Sync`.

use crate::model::SourceError;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;

pub mod file;
pub mod mem;

pub use file::FileSource;
pub use mem::MemSource;

/// A source of paged byte content.
///
/// Pages are fixed-size slices identified by a zero-based index. Every
/// page is exactly `page_size` bytes except the last, which holds the
/// remainder (`total_size mod page_size`, or `page_size` when that is
/// zero and the source is non-empty).
pub trait ByteSource: Send + Sync {
    /// Total content length in bytes.
    fn total_size(&self) -> Result<u64, SourceError>;

    /// Read one page.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::OutOfRange` if `index` is at or past the last
    /// page, or `SourceError::Io` on an underlying read failure.
    fn read_page(&self, index: u64, page_size: usize) -> Result<Vec<u8>, SourceError>;

    /// Human-readable name for the status line.
    fn name(&self) -> &str;
}

/// Number of pages needed to cover `total_size` bytes at `page_size`.
///
/// Always at least 1: an empty source still has one (empty) page, so a
/// session can complete its initial fetch and report "no more content".
pub fn total_pages(total_size: u64, page_size: usize) -> u64 {
    total_size.div_ceil(page_size as u64).max(1)
}

/// Detect and create the appropriate byte source.
///
/// A file path wins; otherwise piped stdin is read to completion into a
/// [`MemSource`]. Invoked with neither, the error tells the user both
/// invocation modes.
///
/// # Errors
///
/// Returns `SourceError::NotFound` for a missing file,
/// `SourceError::NoInput` when stdin is an interactive terminal, or
/// `SourceError::Io` for read failures.
pub fn detect_source(path: Option<PathBuf>) -> Result<Arc<dyn ByteSource>, SourceError> {
    match path {
        Some(path) => Ok(Arc::new(FileSource::open(path)?)),
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(SourceError::NoInput);
            }
            let mut bytes = Vec::new();
            stdin.lock().read_to_end(&mut bytes)?;
            Ok(Arc::new(MemSource::new("<stdin>", bytes)))
        }
    }
}
