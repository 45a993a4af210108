use crate::types::Dimensions;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

// IHDR is always the first chunk, so its payload sits right after the
// signature (8) and the chunk length + type (8).
const IHDR_WIDTH_OFFSET: usize = 16;
const IHDR_HEIGHT_OFFSET: usize = 20;
const MIN_HEADER_LEN: usize = 24;

#[inline]
pub fn is_png(data: &[u8]) -> bool {
    data.len() >= PNG_SIGNATURE.len() && data[..8] == PNG_SIGNATURE
}

pub fn png_dimensions(data: &[u8]) -> Option<Dimensions> {
    if data.len() < MIN_HEADER_LEN || !is_png(data) {
        return None;
    }

    let w = IHDR_WIDTH_OFFSET;
    let h = IHDR_HEIGHT_OFFSET;
    let width = u32::from_be_bytes([data[w], data[w + 1], data[w + 2], data[w + 3]]);
    let height = u32::from_be_bytes([data[h], data[h + 1], data[h + 2], data[h + 3]]);

    Dimensions::new(width, height)
}
