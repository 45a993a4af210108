use crate::types::Dimensions;

pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

const MARKER_PREFIX: u8 = 0xFF;
const MARKER_EOI: u8 = 0xD9;
const MARKER_SOS: u8 = 0xDA;

// Offsets into a SOF segment, counted from the first byte of the length field:
// length(2) precision(1) height(2) width(2).
const SOF_HEIGHT_OFFSET: usize = 3;
const SOF_WIDTH_OFFSET: usize = 5;
const SOF_MIN_LEN: usize = 7;

/// Start-of-frame markers for every coding process. `C4` (DHT), `C8` (JPG)
/// and `CC` (DAC) share the range but carry no frame header.
#[inline]
pub fn is_sof_marker(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

/// Markers with no length field: TEM, the restart markers, and a stuffed zero.
#[inline]
fn is_standalone_marker(marker: u8) -> bool {
    matches!(marker, 0x00 | 0x01 | 0xD0..=0xD7)
}

/// Walks the marker segments up to the first start-of-frame and reads the
/// frame size from it. Scanning stops at SOS or EOI: a frame header never
/// follows either of them.
pub fn jpeg_dimensions(data: &[u8]) -> Option<Dimensions> {
    if data.len() < 4 || data[0..2] != JPEG_SOI {
        return None;
    }

    let mut pos = 2;

    while pos + 3 < data.len() {
        if data[pos] != MARKER_PREFIX {
            pos += 1;
            continue;
        }

        while pos < data.len() && data[pos] == MARKER_PREFIX {
            pos += 1;
        }

        let Some(&marker) = data.get(pos) else {
            break;
        };
        pos += 1;

        if marker == MARKER_EOI || marker == MARKER_SOS {
            break;
        }

        if is_standalone_marker(marker) {
            continue;
        }

        if pos + 1 >= data.len() {
            break;
        }

        let seg_len = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        if seg_len < 2 {
            break;
        }

        if is_sof_marker(marker) {
            if pos + SOF_MIN_LEN > data.len() {
                return None;
            }
            let h = pos + SOF_HEIGHT_OFFSET;
            let w = pos + SOF_WIDTH_OFFSET;
            let height = u16::from_be_bytes([data[h], data[h + 1]]);
            let width = u16::from_be_bytes([data[w], data[w + 1]]);
            return Dimensions::new(u32::from(width), u32::from(height));
        }

        pos += seg_len;
    }

    None
}
