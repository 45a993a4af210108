use crate::types::Dimensions;

pub const RIFF_TAG: &[u8; 4] = b"RIFF";
pub const WEBP_TAG: &[u8; 4] = b"WEBP";

const RIFF_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

const VP8L_SIGNATURE: u8 = 0x2F;
const VP8_START_CODE: [u8; 3] = [0x9D, 0x01, 0x2A];
// The top two bits of each VP8 size field hold the upscaling mode.
const VP8_SIZE_MASK: u16 = 0x3FFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkKind {
    Extended,
    Lossless,
    Lossy,
    /// Only legal after a VP8X header.
    ExtendedOnly,
    Other,
}

impl ChunkKind {
    fn from_tag(tag: &[u8]) -> Self {
        match tag {
            b"VP8X" => Self::Extended,
            b"VP8L" => Self::Lossless,
            b"VP8 " => Self::Lossy,
            b"ANIM" | b"ANMF" | b"ALPH" | b"ICCP" | b"EXIF" | b"XMP " => Self::ExtendedOnly,
            _ => Self::Other,
        }
    }
}

#[inline]
pub fn is_webp(data: &[u8]) -> bool {
    data.len() >= RIFF_HEADER_LEN && &data[0..4] == RIFF_TAG && &data[8..12] == WEBP_TAG
}

/// Walks the RIFF chunks and reads the canvas size from the first image
/// header chunk. A file whose extended-format chunks show up before its VP8X
/// header is malformed and gets no match.
pub fn webp_dimensions(data: &[u8]) -> Option<Dimensions> {
    if !is_webp(data) {
        return None;
    }

    let mut pos = RIFF_HEADER_LEN;

    while data.len().saturating_sub(pos) >= CHUNK_HEADER_LEN {
        let tag = &data[pos..pos + 4];
        let size = [data[pos + 4], data[pos + 5], data[pos + 6], data[pos + 7]];
        let size = usize::try_from(u32::from_le_bytes(size)).ok()?;

        let payload_start = pos + CHUNK_HEADER_LEN;
        let payload_end = payload_start.saturating_add(size).min(data.len());
        let payload = &data[payload_start..payload_end];

        match ChunkKind::from_tag(tag) {
            ChunkKind::Extended => return vp8x_dimensions(payload),
            ChunkKind::Lossless => return vp8l_dimensions(payload),
            ChunkKind::Lossy => return vp8_dimensions(payload),
            ChunkKind::ExtendedOnly => return None,
            ChunkKind::Other => {}
        }

        let padded = size.checked_add(size & 1)?;
        pos = payload_start.checked_add(padded)?;
    }

    None
}

#[inline]
fn read_u24_le(bytes: &[u8]) -> u32 {
    u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16)
}

/// Canvas size is stored minus one, 24 bits each.
fn vp8x_dimensions(payload: &[u8]) -> Option<Dimensions> {
    if payload.len() < 10 {
        return None;
    }
    let width = 1 + read_u24_le(&payload[4..7]);
    let height = 1 + read_u24_le(&payload[7..10]);
    Dimensions::new(width, height)
}

/// 14-bit width and height, each minus one, packed little-endian after the
/// signature byte.
fn vp8l_dimensions(payload: &[u8]) -> Option<Dimensions> {
    if payload.len() < 5 || payload[0] != VP8L_SIGNATURE {
        return None;
    }
    let b0 = u32::from(payload[1]);
    let b1 = u32::from(payload[2]);
    let b2 = u32::from(payload[3]);
    let b3 = u32::from(payload[4]);

    let width = 1 + (((b1 & 0x3F) << 8) | b0);
    let height = 1 + (((b3 & 0x0F) << 10) | (b2 << 2) | ((b1 & 0xC0) >> 6));
    Dimensions::new(width, height)
}

/// Key frame header: 3-byte frame tag, start code, then two 16-bit sizes.
fn vp8_dimensions(payload: &[u8]) -> Option<Dimensions> {
    if payload.len() < 10 || payload[3..6] != VP8_START_CODE {
        return None;
    }
    let width = u16::from_le_bytes([payload[6], payload[7]]) & VP8_SIZE_MASK;
    let height = u16::from_le_bytes([payload[8], payload[9]]) & VP8_SIZE_MASK;
    Dimensions::new(u32::from(width), u32::from(height))
}
