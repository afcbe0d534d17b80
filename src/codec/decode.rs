use std::path::Path;

use image::ImageFormat;
use nearest_resample::Bitmap;

use crate::error::ProcessError;

/// Decode raw image bytes into an RGBA8 [`Bitmap`].
///
/// The format is sniffed from the content, not the filename. Non-image
/// bytes and corrupt data both fail with [`ProcessError::Decode`].
pub fn decode(bytes: &[u8]) -> Result<Bitmap, ProcessError> {
    let format: ImageFormat = image::guess_format(bytes)
        .map_err(|e| ProcessError::Decode(format!("unrecognized image format: {e}")))?;

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ProcessError::Decode(format!("{format:?} decode failed: {e}")))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessError::Decode(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    tracing::debug!(?format, width, height, "Decoded image");

    Bitmap::new(width, height, rgba.into_raw())
        .map_err(|e| ProcessError::Decode(format!("decoded buffer mismatch: {e}")))
}

/// Read and decode an image file.
pub fn decode_file(path: &Path) -> Result<Bitmap, ProcessError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
