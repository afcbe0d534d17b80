//! RGBA bitmap storage.
//!
//! [`Bitmap`] is the only pixel container in the crate: a row-major buffer
//! of RGBA8 samples with its dimensions. Every resize produces a new
//! `Bitmap`; none is ever mutated in place.

mod bitmap;

pub use bitmap::{Bitmap, CHANNELS};
pub(crate) use bitmap::buffer_len;
