use std::fmt;

use crate::api::ResampleError;

/// What the caller asked the resizer to do.
///
/// # Example
///
/// ```
/// use nearest_resample::ResizeRequest;
///
/// let uniform = ResizeRequest::Uniform { factor: 3 };
/// assert_eq!(uniform.resolve(16, 8).unwrap().width, 48);
///
/// // Height derived from aspect ratio: round(300 * 800 / 400) = 600
/// let dims = ResizeRequest::Dimensions { width: Some(800), height: None };
/// assert_eq!(dims.resolve(400, 300).unwrap().height, 600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeRequest {
    /// Multiply both dimensions by `factor`.
    Uniform {
        /// Integer scale factor, must be at least 1
        factor: u32,
    },
    /// Resize to an explicit width and/or height.
    ///
    /// - both set: used as-is (aspect ratio is not enforced)
    /// - one set: the other is derived from the source aspect ratio,
    ///   rounded to nearest, minimum 1
    /// - neither set: target equals the source size
    Dimensions {
        /// Target width in pixels
        width: Option<u32>,
        /// Target height in pixels
        height: Option<u32>,
    },
}

/// Which resize mode a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    /// Uniform integer scaling
    Scale,
    /// Explicit width/height
    Dimensions,
}

/// Concrete output dimensions, both positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSize {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
}

impl ResizeMode {
    /// Short lowercase name, as used in filename templates.
    pub fn name(self) -> &'static str {
        match self {
            ResizeMode::Scale => "scale",
            ResizeMode::Dimensions => "dimensions",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ResizeRequest {
    /// The mode this request belongs to.
    pub fn mode(&self) -> ResizeMode {
        match self {
            ResizeRequest::Uniform { .. } => ResizeMode::Scale,
            ResizeRequest::Dimensions { .. } => ResizeMode::Dimensions,
        }
    }

    /// The uniform factor, if this is a uniform request.
    pub fn factor(&self) -> Option<u32> {
        match self {
            ResizeRequest::Uniform { factor } => Some(*factor),
            ResizeRequest::Dimensions { .. } => None,
        }
    }

    /// Resolve this request against a `src_width x src_height` source.
    ///
    /// Fails with [`ResampleError::InvalidInput`] for a zero-sized source,
    /// a zero factor or dimension, or a target that overflows `u32`.
    pub fn resolve(&self, src_width: u32, src_height: u32) -> Result<TargetSize, ResampleError> {
        if src_width == 0 || src_height == 0 {
            return Err(ResampleError::invalid(format!(
                "source dimensions must be positive, got {}x{}",
                src_width, src_height
            )));
        }

        match *self {
            ResizeRequest::Uniform { factor } => {
                if factor == 0 {
                    return Err(ResampleError::invalid("scale factor must be at least 1"));
                }
                let width = scale_dimension(src_width, factor, "width")?;
                let height = scale_dimension(src_height, factor, "height")?;
                Ok(TargetSize { width, height })
            }
            ResizeRequest::Dimensions { width, height } => {
                if width == Some(0) || height == Some(0) {
                    return Err(ResampleError::invalid(format!(
                        "target dimensions must be positive, got {}x{}",
                        width.unwrap_or(src_width),
                        height.unwrap_or(src_height)
                    )));
                }
                match (width, height) {
                    (Some(width), Some(height)) => Ok(TargetSize { width, height }),
                    (Some(width), None) => Ok(TargetSize {
                        width,
                        height: derive_dimension(src_height, width, src_width)?,
                    }),
                    (None, Some(height)) => Ok(TargetSize {
                        width: derive_dimension(src_width, height, src_height)?,
                        height,
                    }),
                    (None, None) => Ok(TargetSize {
                        width: src_width,
                        height: src_height,
                    }),
                }
            }
        }
    }
}

fn scale_dimension(value: u32, factor: u32, axis: &str) -> Result<u32, ResampleError> {
    value.checked_mul(factor).ok_or_else(|| {
        ResampleError::invalid(format!(
            "{} {} scaled by {} overflows",
            axis, value, factor
        ))
    })
}

/// `round(other * given / base)`, half rounding up, minimum 1.
fn derive_dimension(other: u32, given: u32, base: u32) -> Result<u32, ResampleError> {
    let numerator = 2 * other as u128 * given as u128 + base as u128;
    let derived = numerator / (2 * base as u128);
    let derived = derived.max(1);
    u32::try_from(derived).map_err(|_| {
        ResampleError::invalid(format!(
            "derived dimension {} exceeds the maximum of {}",
            derived,
            u32::MAX
        ))
    })
}
