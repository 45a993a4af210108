use imgsniff::formats::webp::{is_webp, webp_dimensions};

fn riff(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut body = b"WEBP".to_vec();
    for (tag, payload) in chunks {
        body.extend_from_slice(&tag[..]);
        body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        body.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            body.push(0);
        }
    }
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&(body.len() as u32).to_le_bytes());
    data.extend(body);
    data
}

fn vp8x_payload(width_field: [u8; 3], height_field: [u8; 3]) -> Vec<u8> {
    let mut payload = vec![0x00, 0x00, 0x00, 0x00];
    payload.extend_from_slice(&width_field);
    payload.extend_from_slice(&height_field);
    payload
}

#[test]
fn test_vp8x_applies_plus_one() {
    let payload = vp8x_payload([0x04, 0x00, 0x00], [0x09, 0x00, 0x00]);
    let dims = webp_dimensions(&riff(&[(b"VP8X", &payload[..])])).unwrap();
    assert_eq!(dims.width, 5);
    assert_eq!(dims.height, 10);
}

#[test]
fn test_vp8x_24_bit_fields() {
    let payload = vp8x_payload([0xFF, 0xFF, 0xFF], [0x00, 0x00, 0x01]);
    let dims = webp_dimensions(&riff(&[(b"VP8X", &payload[..])])).unwrap();
    assert_eq!(dims.width, 1 << 24);
    assert_eq!(dims.height, (1 << 16) + 1);
}

#[test]
fn test_vp8x_truncated_payload() {
    let mut data = riff(&[(b"VP8X", &vp8x_payload([1, 0, 0], [1, 0, 0])[..])]);
    data.truncate(data.len() - 1);
    assert!(webp_dimensions(&data).is_none());
}

#[test]
fn test_vp8l_minimal_image() {
    // 1x1 lossless: both stored sizes are zero
    let payload = [0x2Fu8, 0x00, 0x00, 0x00, 0x00];
    let dims = webp_dimensions(&riff(&[(b"VP8L", &payload[..])])).unwrap();
    assert_eq!((dims.width, dims.height), (1, 1));
}

#[test]
fn test_vp8l_max_image() {
    let payload = [0x2Fu8, 0xFF, 0xFF, 0xFF, 0x0F];
    let dims = webp_dimensions(&riff(&[(b"VP8L", &payload[..])])).unwrap();
    assert_eq!((dims.width, dims.height), (16384, 16384));
}

#[test]
fn test_vp8_lossy_key_frame() {
    let mut payload = vec![0x30, 0x01, 0x00, 0x9D, 0x01, 0x2A];
    payload.extend_from_slice(&300u16.to_le_bytes());
    payload.extend_from_slice(&(200u16 | 0xC000).to_le_bytes());
    let dims = webp_dimensions(&riff(&[(b"VP8 ", &payload[..])])).unwrap();
    assert_eq!((dims.width, dims.height), (300, 200));
}

#[test]
fn test_vp8_without_trailing_space_is_unknown_chunk() {
    let mut payload = vec![0x30, 0x01, 0x00, 0x9D, 0x01, 0x2A];
    payload.extend_from_slice(&[0x2C, 0x01, 0xC8, 0x00]);
    assert!(webp_dimensions(&riff(&[(b"VP8_", &payload[..])])).is_none());
}

#[test]
fn test_riff_without_webp_form() {
    let mut data = riff(&[(b"VP8L", &[0x2Fu8, 0, 0, 0, 0][..])]);
    data[8..12].copy_from_slice(b"WAVE");
    assert!(!is_webp(&data));
    assert!(webp_dimensions(&data).is_none());
}

#[test]
fn test_extended_chunk_before_vp8x() {
    let vp8x = vp8x_payload([0x04, 0, 0], [0x04, 0, 0]);
    for tag in [b"ANIM", b"ALPH", b"ICCP", b"EXIF", b"XMP "] {
        let data = riff(&[(tag, &[0u8; 4][..]), (b"VP8X", &vp8x[..])]);
        assert!(webp_dimensions(&data).is_none(), "{}", String::from_utf8_lossy(tag));
    }
}

#[test]
fn test_header_only() {
    assert!(webp_dimensions(b"RIFF\x04\x00\x00\x00WEBP").is_none());
}
