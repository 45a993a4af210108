pub mod cli;
pub mod error;
pub mod formats;
pub mod gallery;
pub mod io;
pub mod logging;
pub mod sniff;
pub mod types;

pub use error::{GalleryError, SniffError};
pub use io::{DEFAULT_HEAD_BYTES, HeaderReader, read_head};
pub use sniff::{sniff, sniff_format, sniff_path, sniff_path_format};
pub use types::{Dimensions, ImageFormat};
