//! Error type for the nearest-resample public API.

use std::fmt;

/// Error type for resize operations.
///
/// Resizing is deterministic, so retrying a failed call with the same
/// arguments fails the same way. Callers must correct the request first.
///
/// # Example
///
/// ```
/// use nearest_resample::{resample, Bitmap, ResampleError};
///
/// let source = Bitmap::filled(4, 4, [0, 0, 0, 255]);
/// let err = resample(&source, 0, 4).unwrap_err();
///
/// assert!(matches!(err, ResampleError::InvalidInput { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// Zero source/target dimension, mismatched pixel buffer, or a size
    /// that overflows the addressable range.
    InvalidInput {
        /// Human-readable description of the rejected input
        reason: String,
    },
}

impl ResampleError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ResampleError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleError::InvalidInput { reason } => write!(f, "invalid input: {}", reason),
        }
    }
}

impl std::error::Error for ResampleError {}
