#![no_main]

use imgsniff::{ImageFormat, sniff, sniff_format};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let found = sniff_format(data);
    assert_eq!(found.map(|(_, dims)| dims), sniff(data));

    for format in ImageFormat::PROBE_ORDER {
        if let Some(dims) = format.parse(data) {
            assert!(dims.width > 0 && dims.height > 0);
        }
    }
});
