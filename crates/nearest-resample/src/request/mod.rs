//! Resize requests and target size resolution.
//!
//! A [`ResizeRequest`] describes what the user asked for; [`TargetSize`] is
//! the concrete pair of positive dimensions it resolves to for a given
//! source. The resampler itself only ever sees a `TargetSize`.

mod target;

pub use target::{ResizeMode, ResizeRequest, TargetSize};
