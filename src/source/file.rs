//! File-backed byte source.

use crate::model::SourceError;
use crate::source::{total_pages, ByteSource};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Byte source reading pages from a file on disk.
///
/// The file handle sits behind a mutex: the source is shared read-only
/// between the UI thread and the fetch worker, and seek+read is a two-step
/// operation that must not interleave.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    name: String,
    len: u64,
    file: Mutex<File>,
}

impl FileSource {
    /// Open a file as a byte source.
    ///
    /// The length is captured once at open time; a file growing underneath
    /// the viewer is not re-measured (the viewer shows the content as it
    /// was when opened).
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the path does not exist, or
    /// `SourceError::Io` for other open/metadata failures.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SourceError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            len,
            file: Mutex::new(file),
        })
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn total_size(&self) -> Result<u64, SourceError> {
        Ok(self.len)
    }

    fn read_page(&self, index: u64, page_size: usize) -> Result<Vec<u8>, SourceError> {
        let pages = total_pages(self.len, page_size);
        if index >= pages {
            return Err(SourceError::OutOfRange {
                index,
                total_pages: pages,
            });
        }

        let offset = index * page_size as u64;
        let remaining = self.len.saturating_sub(offset);
        let want = (page_size as u64).min(remaining) as usize;

        let mut buffer = vec![0u8; want];
        {
            let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(&mut buffer)?;
        }

        Ok(buffer)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
