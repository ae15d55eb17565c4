//! Single-flight page fetch controller.
//!
//! The controller is the sole writer of [`Session`] state. Page reads run
//! on a dedicated worker thread; requests and results travel over mpsc
//! channels, and the UI thread commits results during its timer tick via
//! [`FetchController::poll`]. All session mutation therefore happens on
//! one logical thread, and the `InFlight` status is the only concurrency
//! gate needed.
//!
//! Every request is tagged with the session generation at issue time. A
//! result whose generation no longer matches (the user reset or switched
//! sources while the read was outstanding, or the read timed out) is
//! discarded rather than appended into the wrong session.

use crate::model::SourceError;
use crate::session::{FetchStatus, Session};
use crate::source::{total_pages, ByteSource};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

struct FetchRequest {
    generation: u64,
    index: u64,
    page_size: usize,
    source: Arc<dyn ByteSource>,
}

struct FetchResult {
    generation: u64,
    index: u64,
    outcome: Result<Vec<u8>, SourceError>,
}

/// Issues page reads against the session's source and commits the results.
///
/// Enforces the at-most-one-outstanding-fetch and forward-only ordering
/// invariants: the only page ever requested is `session.next_page_index()`,
/// and only when no fetch is outstanding.
pub struct FetchController {
    req_tx: Sender<FetchRequest>,
    res_rx: Receiver<FetchResult>,
    timeout: Duration,
}

impl std::fmt::Debug for FetchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchController")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl FetchController {
    /// Spawn the fetch worker thread.
    ///
    /// `timeout` bounds how long a single page read may stay outstanding
    /// before it is abandoned and surfaced as a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn new(timeout: Duration) -> std::io::Result<Self> {
        let (req_tx, req_rx) = mpsc::channel::<FetchRequest>();
        let (res_tx, res_rx) = mpsc::channel::<FetchResult>();

        std::thread::Builder::new()
            .name("hxv-fetch".to_string())
            .spawn(move || {
                while let Ok(req) = req_rx.recv() {
                    let outcome = req.source.read_page(req.index, req.page_size);
                    let result = FetchResult {
                        generation: req.generation,
                        index: req.index,
                        outcome,
                    };
                    if res_tx.send(result).is_err() {
                        // Controller dropped; nothing left to deliver to.
                        break;
                    }
                }
            })?;

        Ok(Self {
            req_tx,
            res_rx,
            timeout,
        })
    }

    /// Replace the session's source and start over from page 0.
    ///
    /// Clears the page cache, bumps the generation (so any in-flight
    /// result for the previous source is discarded on arrival), records
    /// the new source's page count, and requests page 0.
    ///
    /// Calling this again before the first fetch completes simply restarts
    /// the sequence; the end state is identical to a single reset.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source's total size cannot be read.
    pub fn reset(
        &self,
        session: &mut Session,
        source: Arc<dyn ByteSource>,
    ) -> Result<(), SourceError> {
        let total_size = source.total_size()?;

        session.generation = session.generation.wrapping_add(1);
        session.pages.clear();
        session.fetch = FetchStatus::Idle;
        session.total_size = total_size;
        session.total_pages = total_pages(total_size, session.page_size);
        session.source = Some(source);

        debug!(
            total_size,
            total_pages = session.total_pages,
            generation = session.generation,
            "session reset"
        );

        self.request_next(session);
        Ok(())
    }

    /// Request the next unloaded page, if allowed.
    ///
    /// No-op when a fetch is already outstanding or when every page is
    /// loaded; the only index ever issued is `session.next_page_index()`,
    /// so pages land strictly in order.
    pub fn request_next(&self, session: &mut Session) {
        if session.fetch_in_flight() {
            return;
        }
        if !session.has_more() {
            return;
        }
        let Some(source) = session.source.clone() else {
            return;
        };

        let index = session.next_page_index();
        let request = FetchRequest {
            generation: session.generation,
            index,
            page_size: session.page_size,
            source,
        };

        if self.req_tx.send(request).is_ok() {
            debug!(index, "page fetch issued");
            session.fetch = FetchStatus::InFlight {
                index,
                since: Instant::now(),
            };
        } else {
            error!(index, "fetch worker unavailable");
            session.fetch = FetchStatus::Failed {
                index,
                message: "fetch worker unavailable".to_string(),
            };
        }
    }

    /// React to the viewport nearing the end of rendered content.
    ///
    /// The near-end signal may fire spuriously (while a fetch is in
    /// flight, or with all pages loaded); the gates in [`request_next`]
    /// make those cases no-ops.
    ///
    /// [`request_next`]: FetchController::request_next
    pub fn on_viewport_near_end(&self, session: &mut Session) {
        self.request_next(session);
    }

    /// Drain completed fetches into the session and check for timeout.
    ///
    /// Returns `true` if the session changed (a redraw is warranted).
    /// Pages are committed whole, atomically, on success; on failure the
    /// cache is untouched and a `Failed` status is recorded so the next
    /// near-end signal retries the same page.
    pub fn poll(&self, session: &mut Session) -> bool {
        let mut changed = false;

        while let Ok(result) = self.res_rx.try_recv() {
            if result.generation != session.generation {
                debug!(
                    index = result.index,
                    stale = result.generation,
                    current = session.generation,
                    "discarding stale fetch result"
                );
                continue;
            }

            let expected = match session.fetch {
                FetchStatus::InFlight { index, .. } => index,
                _ => {
                    warn!(index = result.index, "fetch result with no fetch in flight");
                    continue;
                }
            };
            if result.index != expected {
                warn!(
                    index = result.index,
                    expected, "fetch result for unexpected page"
                );
                continue;
            }

            match result.outcome {
                Ok(bytes) => {
                    debug!(index = result.index, len = bytes.len(), "page committed");
                    session.pages.push(bytes);
                    session.fetch = FetchStatus::Idle;
                }
                Err(err @ SourceError::OutOfRange { .. }) => {
                    // The gates above should make this unreachable.
                    error!(index = result.index, %err, "out-of-range fetch issued");
                    session.fetch = FetchStatus::Failed {
                        index: result.index,
                        message: err.to_string(),
                    };
                }
                Err(err) => {
                    warn!(index = result.index, %err, "page fetch failed");
                    session.fetch = FetchStatus::Failed {
                        index: result.index,
                        message: err.to_string(),
                    };
                }
            }
            changed = true;
        }

        if let FetchStatus::InFlight { index, since } = session.fetch {
            if since.elapsed() >= self.timeout {
                warn!(index, "page fetch timed out");
                // Bump the generation so the late result, if it ever
                // arrives, is discarded instead of committed.
                session.generation = session.generation.wrapping_add(1);
                session.fetch = FetchStatus::Failed {
                    index,
                    message: "fetch timed out".to_string(),
                };
                changed = true;
            }
        }

        changed
    }
}
