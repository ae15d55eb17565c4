//! Viewer session state: the page cache and fetch status.
//!
//! A [`Session`] is the live state of one open source: the fixed page
//! size chosen at startup, the pages fetched so far, and whether a fetch
//! is currently outstanding. It is pure data; all mutation goes through
//! the [`fetcher::FetchController`], which is the session's sole writer.
//!
//! # Invariants
//!
//! - `pages[i]` is exactly what `source.read_page(i, page_size)` returned;
//!   pages are appended strictly in index order and never removed.
//! - `pages.len() <= total_pages` at all times.
//! - At most one fetch is outstanding per session, tracked by
//!   [`FetchStatus::InFlight`].

use crate::source::ByteSource;
use std::sync::Arc;
use std::time::Instant;

pub mod fetcher;

pub use fetcher::FetchController;

/// Status of the session's single fetch slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// No fetch outstanding.
    Idle,
    /// A page read has been issued and has not yet resolved.
    InFlight {
        /// The page index being fetched.
        index: u64,
        /// When the request was issued, for timeout detection.
        since: Instant,
    },
    /// The last fetch failed; the cache is unchanged and the same page
    /// will be re-requested on the next near-end signal.
    Failed {
        /// The page index that failed.
        index: u64,
        /// Human-readable failure description for the status line.
        message: String,
    },
}

/// Live state of one open source.
pub struct Session {
    page_size: usize,
    total_size: u64,
    total_pages: u64,
    pages: Vec<Vec<u8>>,
    fetch: FetchStatus,
    generation: u64,
    source: Option<Arc<dyn ByteSource>>,
}

// Manual impl: `dyn ByteSource` is not `Debug`, so the source is
// summarized by name.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("page_size", &self.page_size)
            .field("total_size", &self.total_size)
            .field("total_pages", &self.total_pages)
            .field("pages_loaded", &self.pages.len())
            .field("fetch", &self.fetch)
            .field("generation", &self.generation)
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl Session {
    /// Create an empty session with no source attached.
    ///
    /// `page_size` is fixed for the session's lifetime; attach a source
    /// with [`FetchController::reset`].
    pub fn new(page_size: usize) -> Self {
        debug_assert!(page_size > 0, "page size must be positive");
        Self {
            page_size,
            total_size: 0,
            total_pages: 0,
            pages: Vec::new(),
            fetch: FetchStatus::Idle,
            generation: 0,
            source: None,
        }
    }

    /// The fixed page size in bytes.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total size of the current source in bytes (0 with no source).
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Total page count of the current source (0 with no source).
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Pages fetched so far, in index order.
    pub fn pages(&self) -> &[Vec<u8>] {
        &self.pages
    }

    /// Current fetch status.
    pub fn fetch(&self) -> &FetchStatus {
        &self.fetch
    }

    /// Session epoch; bumped on every reset so stale fetch results from a
    /// previous source are discarded instead of contaminating this one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The source currently attached, if any.
    pub fn source(&self) -> Option<&Arc<dyn ByteSource>> {
        self.source.as_ref()
    }

    /// Index of the next page to fetch (== number of loaded pages).
    pub fn next_page_index(&self) -> u64 {
        self.pages.len() as u64
    }

    /// Whether unloaded pages remain.
    pub fn has_more(&self) -> bool {
        self.source.is_some() && (self.pages.len() as u64) < self.total_pages
    }

    /// Whether a fetch is currently outstanding.
    pub fn fetch_in_flight(&self) -> bool {
        matches!(self.fetch, FetchStatus::InFlight { .. })
    }

    /// Total bytes loaded so far.
    pub fn loaded_bytes(&self) -> u64 {
        self.pages.iter().map(|p| p.len() as u64).sum()
    }
}
