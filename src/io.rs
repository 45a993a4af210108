use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SniffError};

/// Enough for every header the parsers understand, including JPEGs with
/// large EXIF or ICC segments ahead of the frame header.
pub const DEFAULT_HEAD_BYTES: usize = 64 * 1024;

/// Reads a bounded prefix of a file. The budget caps both the I/O and the
/// allocation per file regardless of how large the file is.
#[derive(Debug, Clone, Copy)]
pub struct HeaderReader {
    budget: usize,
}

impl HeaderReader {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    #[inline]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Returns at most `budget` bytes from offset 0. Shorter files yield
    /// their whole contents; an empty file yields an empty buffer.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SniffError::io(path, e))?;

        let file_len = file.metadata().map(|m| m.len()).unwrap_or(0);
        let capacity = usize::try_from(file_len)
            .unwrap_or(usize::MAX)
            .min(self.budget);

        let mut buffer = Vec::with_capacity(capacity);
        file.take(self.budget as u64)
            .read_to_end(&mut buffer)
            .map_err(|e| SniffError::io(path, e))?;

        Ok(buffer)
    }
}

impl Default for HeaderReader {
    fn default() -> Self {
        Self::new(DEFAULT_HEAD_BYTES)
    }
}

pub fn read_head(path: impl AsRef<Path>, budget: usize) -> Result<Vec<u8>> {
    HeaderReader::new(budget).read(path)
}
