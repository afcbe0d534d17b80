use crate::api::ResampleError;

/// Number of samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An immutable RGBA8 image.
///
/// Pixels are stored row-major, four bytes per pixel, so the buffer length
/// is always `width * height * 4`. The length is checked on construction;
/// zero dimensions are representable (with an empty buffer) but rejected by
/// the resampler.
///
/// # Example
///
/// ```
/// use nearest_resample::Bitmap;
///
/// let pixels = vec![
///     255, 0, 0, 255,   0, 255, 0, 255,
///     0, 0, 255, 255,   255, 255, 255, 255,
/// ];
/// let bitmap = Bitmap::new(2, 2, pixels).unwrap();
///
/// assert_eq!(bitmap.pixel(1, 0), [0, 255, 0, 255]);
/// assert_eq!(bitmap.pixel(0, 1), [0, 0, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap from a row-major RGBA8 buffer.
    ///
    /// Fails with [`ResampleError::InvalidInput`] when `pixels.len()` is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ResampleError> {
        let expected = buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(ResampleError::invalid(format!(
                "pixel buffer has {} bytes, expected {} for {}x{} RGBA",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a bitmap where every pixel has the same RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let len = width as usize * height as usize;
        let pixels = rgba.repeat(len);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a bitmap from a per-pixel function of `(x, y)`.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The raw RGBA8 buffer, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the bitmap and return its RGBA8 buffer.
    #[inline]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// One row of RGBA samples (`width * 4` bytes).
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the bitmap.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} bitmap",
            x,
            y,
            self.width,
            self.height
        );
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + CHANNELS]);
        rgba
    }

    /// Iterate over all pixels in row-major order.
    pub fn iter_pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Bytes per row.
    #[inline]
    pub(crate) fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Build from parts already known to be consistent.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "buffer length must match {}x{} RGBA",
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Byte length of a `width x height` RGBA buffer, rejecting overflow.
pub(crate) fn buffer_len(width: u32, height: u32) -> Result<usize, ResampleError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| {
            ResampleError::invalid(format!(
                "{}x{} RGBA buffer exceeds addressable memory",
                width, height
            ))
        })
}
