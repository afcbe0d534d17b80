//! Assertion helpers for tests.

use std::collections::HashSet;

use nearest_resample::Bitmap;
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert a bitmap has the expected size
pub fn assert_dimensions(bitmap: &Bitmap, width: u32, height: u32) {
    assert_eq!(
        bitmap.dimensions(),
        (width, height),
        "Unexpected output dimensions"
    );
}

/// Assert every colour in `output` also occurs in `source`
pub fn assert_no_new_colors(source: &Bitmap, output: &Bitmap) {
    let palette: HashSet<[u8; 4]> = source.iter_pixels().collect();
    for pixel in output.iter_pixels() {
        assert!(
            palette.contains(&pixel),
            "Output contains colour {pixel:?} not present in the source"
        );
    }
}
