use std::io::Cursor;

use nearest_resample::Bitmap;

use crate::error::ProcessError;

/// Encode a bitmap as an 8-bit RGBA PNG.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, ProcessError> {
    if bitmap.is_empty() {
        return Err(ProcessError::Encode(format!(
            "cannot encode empty {}x{} image",
            bitmap.width(),
            bitmap.height()
        )));
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, bitmap.width(), bitmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        writer
            .write_image_data(bitmap.pixels())
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
