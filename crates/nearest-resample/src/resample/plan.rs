//! Power-of-two upscale factor selection.

use crate::api::ResampleError;
use crate::bitmap::buffer_len;

/// The intermediate stage chosen for a `source -> target` resample.
///
/// `power_scale` is `max(ceil(log2(tw / sw)), ceil(log2(th / sh)))`,
/// clamped to zero, computed exactly with integer shifts rather than
/// floating-point logarithms.
///
/// # Example
///
/// ```
/// use nearest_resample::ResamplePlan;
///
/// // Downscale: no upscale stage
/// let plan = ResamplePlan::new(64, 64, 16, 16).unwrap();
/// assert_eq!(plan.upscale_factor, 1);
///
/// // 100 -> 300 needs 2^2 = 4x (400 >= 300)
/// let plan = ResamplePlan::new(100, 100, 300, 300).unwrap();
/// assert_eq!(plan.power_scale, 2);
/// assert_eq!(plan.intermediate_width, 400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResamplePlan {
    /// Exponent `k` of the upscale factor `2^k`.
    pub power_scale: u32,
    /// `2^power_scale`, at least 1.
    pub upscale_factor: u32,
    /// Width after the integer upscale stage.
    pub intermediate_width: u32,
    /// Height after the integer upscale stage.
    pub intermediate_height: u32,
    /// Final width.
    pub target_width: u32,
    /// Final height.
    pub target_height: u32,
}

impl ResamplePlan {
    /// Plan a resample from `src_width x src_height` to
    /// `target_width x target_height`.
    ///
    /// Fails with [`ResampleError::InvalidInput`] when any dimension is zero
    /// or the intermediate image would not be addressable.
    pub fn new(
        src_width: u32,
        src_height: u32,
        target_width: u32,
        target_height: u32,
    ) -> Result<Self, ResampleError> {
        if src_width == 0 || src_height == 0 {
            return Err(ResampleError::invalid(format!(
                "source dimensions must be positive, got {}x{}",
                src_width, src_height
            )));
        }
        if target_width == 0 || target_height == 0 {
            return Err(ResampleError::invalid(format!(
                "target dimensions must be positive, got {}x{}",
                target_width, target_height
            )));
        }

        let power_scale = ceil_log2_ratio(src_width, target_width)
            .max(ceil_log2_ratio(src_height, target_height));

        let factor = 1u64 << power_scale;
        let intermediate_width = scaled(src_width, factor)?;
        let intermediate_height = scaled(src_height, factor)?;
        buffer_len(intermediate_width, intermediate_height)?;

        Ok(Self {
            power_scale,
            upscale_factor: factor as u32,
            intermediate_width,
            intermediate_height,
            target_width,
            target_height,
        })
    }

    /// True when the intermediate image already has the target size.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.intermediate_width == self.target_width
            && self.intermediate_height == self.target_height
    }
}

/// Smallest `k >= 0` such that `src * 2^k >= target`.
fn ceil_log2_ratio(src: u32, target: u32) -> u32 {
    let (src, target) = (src as u64, target as u64);
    let mut k = 0;
    while (src << k) < target {
        k += 1;
    }
    k
}

fn scaled(value: u32, factor: u64) -> Result<u32, ResampleError> {
    u32::try_from(value as u64 * factor).map_err(|_| {
        ResampleError::invalid(format!(
            "intermediate dimension {} x {} exceeds the maximum of {}",
            value,
            factor,
            u32::MAX
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2_ratio() {
        assert_eq!(ceil_log2_ratio(100, 100), 0);
        assert_eq!(ceil_log2_ratio(100, 50), 0);
        assert_eq!(ceil_log2_ratio(100, 101), 1);
        assert_eq!(ceil_log2_ratio(100, 200), 1);
        assert_eq!(ceil_log2_ratio(100, 201), 2);
        assert_eq!(ceil_log2_ratio(100, 300), 2);
        assert_eq!(ceil_log2_ratio(1, 1024), 10);
        assert_eq!(ceil_log2_ratio(1, 1025), 11);
    }

    #[test]
    fn test_plan_uses_larger_axis() {
        // x needs 2x, y needs 8x
        let plan = ResamplePlan::new(10, 10, 20, 80).unwrap();
        assert_eq!(plan.power_scale, 3);
        assert_eq!(plan.upscale_factor, 8);
        assert_eq!((plan.intermediate_width, plan.intermediate_height), (80, 80));
        assert!(!plan.is_exact());
    }

    #[test]
    fn test_plan_identity_is_factor_one() {
        let plan = ResamplePlan::new(32, 16, 32, 16).unwrap();
        assert_eq!(plan.upscale_factor, 1);
        assert!(plan.is_exact());
    }

    #[test]
    fn test_plan_mixed_up_and_down() {
        // x shrinks, y grows 3x -> 4x
        let plan = ResamplePlan::new(100, 10, 50, 30).unwrap();
        assert_eq!(plan.upscale_factor, 4);
        assert_eq!((plan.intermediate_width, plan.intermediate_height), (400, 40));
    }

    #[test]
    fn test_plan_rejects_zero() {
        assert!(ResamplePlan::new(0, 10, 10, 10).is_err());
        assert!(ResamplePlan::new(10, 10, 10, 0).is_err());
    }

    #[test]
    fn test_plan_rejects_unaddressable_intermediate() {
        let err = ResamplePlan::new(1, 3, u32::MAX, 3).unwrap_err();
        assert!(matches!(err, ResampleError::InvalidInput { .. }));
    }
}
