//! In-memory byte source.
//!
//! Backs piped-stdin input (read to completion before the TUI starts) and
//! most of the test suite.

use crate::model::SourceError;
use crate::source::{total_pages, ByteSource};

/// Byte source over an owned in-memory buffer.
#[derive(Debug, Clone)]
pub struct MemSource {
    name: String,
    bytes: Vec<u8>,
}

impl MemSource {
    /// Create a source over the given bytes.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl ByteSource for MemSource {
    fn total_size(&self) -> Result<u64, SourceError> {
        Ok(self.bytes.len() as u64)
    }

    fn read_page(&self, index: u64, page_size: usize) -> Result<Vec<u8>, SourceError> {
        let pages = total_pages(self.bytes.len() as u64, page_size);
        if index >= pages {
            return Err(SourceError::OutOfRange {
                index,
                total_pages: pages,
            });
        }

        let start = (index as usize) * page_size;
        let end = (start + page_size).min(self.bytes.len());
        // Page 0 of an empty source: start == end == 0
        Ok(self.bytes[start.min(self.bytes.len())..end].to_vec())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
