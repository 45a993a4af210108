//! Header parsers for the supported raster formats.
//!
//! Every parser takes the leading bytes of a file and returns the pixel size
//! when the bytes carry that format's signature and a complete size field.
//! Truncated or malformed input is never an error, only `None`.

pub mod gif;
pub mod jpeg;
pub mod png;
pub mod webp;

pub use gif::gif_dimensions;
pub use jpeg::jpeg_dimensions;
pub use png::png_dimensions;
pub use webp::webp_dimensions;
