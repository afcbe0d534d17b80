//! Test images and file helpers.

use std::path::{Path, PathBuf};

use crispscale::codec::encode_png;
use nearest_resample::Bitmap;

/// Palette used by the checkerboard fixtures
pub mod colors {
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
    pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
}

/// Two-colour checkerboard with 1-pixel cells
pub fn checkerboard(width: u32, height: u32) -> Bitmap {
    Bitmap::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            colors::RED
        } else {
            colors::BLUE
        }
    })
}

/// PNG bytes of a checkerboard
pub fn checkerboard_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&checkerboard(width, height)).unwrap()
}

/// Bytes that no decoder accepts
pub fn corrupt_bytes() -> Vec<u8> {
    b"this is not an image".to_vec()
}

/// Write `bytes` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
