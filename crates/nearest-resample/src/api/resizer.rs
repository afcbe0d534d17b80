//! The `resize()` entry point.
//!
//! Resolves a [`ResizeRequest`] to a [`TargetSize`](crate::TargetSize) and
//! runs the two-stage resample.

use crate::api::ResampleError;
use crate::bitmap::Bitmap;
use crate::request::ResizeRequest;
use crate::resample::resample;

/// Output of [`resize()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeResult {
    /// The resized bitmap.
    pub bitmap: Bitmap,
    /// The uniform factor applied, `None` for dimension requests.
    pub applied_factor: Option<u32>,
}

impl ResizeResult {
    /// Final `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }
}

/// Resize `source` according to `request`.
///
/// The source is never modified; a new bitmap is always returned.
///
/// # Example
///
/// ```
/// use nearest_resample::{resize, Bitmap, ResizeRequest};
///
/// let source = Bitmap::filled(400, 300, [12, 34, 56, 255]);
/// let request = ResizeRequest::Dimensions { width: Some(800), height: None };
/// let result = resize(&source, &request).unwrap();
///
/// assert_eq!(result.dimensions(), (800, 600));
/// assert_eq!(result.applied_factor, None);
/// ```
pub fn resize(source: &Bitmap, request: &ResizeRequest) -> Result<ResizeResult, ResampleError> {
    let target = request.resolve(source.width(), source.height())?;
    let bitmap = resample(source, target.width, target.height)?;
    Ok(ResizeResult {
        bitmap,
        applied_factor: request.factor(),
    })
}
