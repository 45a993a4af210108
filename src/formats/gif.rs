use crate::types::Dimensions;

pub const GIF87A: &[u8; 6] = b"GIF87a";
pub const GIF89A: &[u8; 6] = b"GIF89a";

const MIN_HEADER_LEN: usize = 10;

#[inline]
pub fn is_gif(data: &[u8]) -> bool {
    data.len() >= 6 && (&data[..6] == GIF87A || &data[..6] == GIF89A)
}

/// Reads the logical screen size from the GIF header.
pub fn gif_dimensions(data: &[u8]) -> Option<Dimensions> {
    if data.len() < MIN_HEADER_LEN || !is_gif(data) {
        return None;
    }

    let width = u16::from_le_bytes([data[6], data[7]]);
    let height = u16::from_le_bytes([data[8], data[9]]);

    Dimensions::new(u32::from(width), u32::from(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif87a() {
        let mut data = GIF87A.to_vec();
        data.extend_from_slice(&[0x00, 0x01, 0x2C, 0x01]);
        assert_eq!(gif_dimensions(&data), Dimensions::new(256, 300));
    }

    #[test]
    fn test_unknown_version() {
        let mut data = b"GIF90a".to_vec();
        data.extend_from_slice(&[0x10, 0x00, 0x10, 0x00]);
        assert!(gif_dimensions(&data).is_none());
    }

    #[test]
    fn test_truncated() {
        assert!(gif_dimensions(b"GIF89a\x10\x00\x10").is_none());
    }
}
