//! Two-stage nearest-neighbor resampling.
//!
//! The pipeline is:
//!
//! 1. **Plan** ([`ResamplePlan`]) - pick the smallest power-of-two upscale
//!    factor that makes the source at least as large as the target in both
//!    axes (clamped to 1 when the target is not larger)
//! 2. **Integer upscale** ([`upscale_integer()`]) - every source pixel
//!    becomes a solid `f x f` block
//! 3. **Nearest resample** ([`resample_nearest()`]) - map each destination
//!    pixel to `floor(x * src / dst)` on the intermediate image
//!
//! [`resample()`] runs all three. No stage ever blends channel values.

mod nearest;
mod plan;

pub use nearest::{resample_nearest, upscale_integer};
pub use plan::ResamplePlan;

use crate::api::ResampleError;
use crate::bitmap::Bitmap;

/// Resample `source` to exactly `target_width x target_height`.
///
/// Upscales by the power-of-two factor from [`ResamplePlan`], then performs
/// the final nearest-neighbor resample to the requested size.
///
/// # Example
///
/// ```
/// use nearest_resample::{resample, Bitmap};
///
/// let source = Bitmap::from_fn(3, 3, |x, y| [(x * 80) as u8, (y * 80) as u8, 0, 255]);
/// let output = resample(&source, 7, 5).unwrap();
///
/// assert_eq!(output.dimensions(), (7, 5));
/// ```
pub fn resample(
    source: &Bitmap,
    target_width: u32,
    target_height: u32,
) -> Result<Bitmap, ResampleError> {
    let plan = ResamplePlan::new(
        source.width(),
        source.height(),
        target_width,
        target_height,
    )?;

    if plan.upscale_factor == 1 {
        return resample_nearest(source, target_width, target_height);
    }

    let intermediate = upscale_integer(source, plan.upscale_factor)?;
    if plan.is_exact() {
        return Ok(intermediate);
    }
    resample_nearest(&intermediate, target_width, target_height)
}
