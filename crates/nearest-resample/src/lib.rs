#![allow(clippy::module_inception)]

//! nearest-resample: crisp resizing for pixel art
//!
//! Standard interpolation (bilinear, bicubic) blurs the hard edges that make
//! pixel art readable. This crate resizes RGBA bitmaps using nearest-neighbor
//! sampling only, so every output pixel is a verbatim copy of some source
//! pixel.
//!
//! # Quick Start
//!
//! [`resize()`] is the primary entry point:
//!
//! ```
//! use nearest_resample::{resize, Bitmap, ResizeRequest};
//!
//! let source = Bitmap::filled(2, 2, [255, 0, 0, 255]);
//! let result = resize(&source, &ResizeRequest::Uniform { factor: 4 }).unwrap();
//!
//! assert_eq!(result.bitmap.width(), 8);
//! assert_eq!(result.bitmap.height(), 8);
//! assert_eq!(result.applied_factor, Some(4));
//! ```
//!
//! # Resize Requests
//!
//! A [`ResizeRequest`] is resolved against the source size into a concrete
//! [`TargetSize`] before any pixel is touched:
//!
//! - [`ResizeRequest::Uniform`]: multiply both dimensions by an integer factor
//! - [`ResizeRequest::Dimensions`]: explicit width and/or height; a missing
//!   side is derived from the source aspect ratio
//!
//! ```
//! use nearest_resample::ResizeRequest;
//!
//! let request = ResizeRequest::Dimensions { width: Some(800), height: None };
//! let target = request.resolve(400, 300).unwrap();
//!
//! assert_eq!((target.width, target.height), (800, 600));
//! ```
//!
//! # Two-Stage Pipeline
//!
//! A single nearest-neighbor pass from `W` to an arbitrary `W'` produces
//! uneven block sizes whenever `W'/W` is not an integer. Resampling runs in
//! two stages instead:
//!
//! ```text
//! source (W x H)
//!     |
//!     v
//! Stage 1: integer upscale by 2^k     (uniform k x k blocks, artifact-free)
//!     |      k = smallest power so that W*2^k >= W' and H*2^k >= H'
//!     v
//! intermediate (W*2^k x H*2^k)
//!     |
//!     v
//! Stage 2: nearest-neighbor resample  (x -> floor(x * iW / W'))
//!     |
//!     v
//! output (W' x H')
//! ```
//!
//! When the target is not larger than the source in either axis, the upscale
//! factor is 1 and stage 1 is skipped. [`ResamplePlan`] exposes the chosen
//! factor and intermediate size:
//!
//! ```
//! use nearest_resample::ResamplePlan;
//!
//! let plan = ResamplePlan::new(100, 100, 300, 300).unwrap();
//! assert_eq!(plan.upscale_factor, 4);
//! assert_eq!((plan.intermediate_width, plan.intermediate_height), (400, 400));
//! ```
//!
//! # Guarantees
//!
//! - Output contains only colors present in the source; channels are copied
//!   verbatim (no gamma, no premultiplication, no blending).
//! - Resizing to the source size is byte-identical.
//! - Zero-sized sources or targets fail with
//!   [`ResampleError::InvalidInput`]; no partial bitmap is ever returned.
//! - Every call is pure and deterministic.

pub mod api;
pub mod bitmap;
pub mod request;
pub mod resample;


pub use api::{resize, ResampleError, ResizeResult};
pub use bitmap::{Bitmap, CHANNELS};
pub use request::{ResizeMode, ResizeRequest, TargetSize};
pub use resample::{resample, resample_nearest, upscale_integer, ResamplePlan};
