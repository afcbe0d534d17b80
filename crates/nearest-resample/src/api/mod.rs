//! Public API for the nearest-resample crate.
//!
//! This module provides the high-level [`resize()`] entry point, its
//! [`ResizeResult`] and the [`ResampleError`] error type.

mod error;
mod resizer;

pub use error::ResampleError;
pub use resizer::{resize, ResizeResult};
