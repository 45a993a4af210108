use std::path::Path;

use tracing::trace;

use crate::error::Result;
use crate::io::HeaderReader;
use crate::types::{Dimensions, ImageFormat};

/// Tries each parser in [`ImageFormat::PROBE_ORDER`] and returns the first
/// match together with the format that produced it.
pub fn sniff_format(data: &[u8]) -> Option<(ImageFormat, Dimensions)> {
    ImageFormat::PROBE_ORDER
        .into_iter()
        .find_map(|format| format.parse(data).map(|dims| (format, dims)))
}

#[inline]
pub fn sniff(data: &[u8]) -> Option<Dimensions> {
    sniff_format(data).map(|(_, dims)| dims)
}

/// Reads the head of `path` and sniffs it. Only a failed read is an error;
/// an unrecognised or truncated header is `Ok(None)`.
pub fn sniff_path(path: impl AsRef<Path>, budget: usize) -> Result<Option<Dimensions>> {
    Ok(sniff_path_format(path, &HeaderReader::new(budget))?.map(|(_, dims)| dims))
}

pub fn sniff_path_format(
    path: impl AsRef<Path>,
    reader: &HeaderReader,
) -> Result<Option<(ImageFormat, Dimensions)>> {
    let path = path.as_ref();
    let head = reader.read(path)?;
    let found = sniff_format(&head);

    trace!(
        path = %path.display(),
        bytes = head.len(),
        format = ?found.map(|(format, _)| format),
        "sniffed header"
    );

    Ok(found)
}
