use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading an image header off disk.
#[derive(Error, Debug)]
pub enum SniffError {
    #[error("Failed to read header of {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SniffError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that abort manifest generation.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Failed to write manifest {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SniffError>;
