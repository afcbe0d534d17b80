//! Image codecs at the edge of the pipeline.
//!
//! Decoding accepts any format the `image` crate is built with here (PNG,
//! JPEG, GIF, BMP, ICO, WebP) and always yields RGBA8. Encoding always
//! writes 8-bit RGBA PNG, which is lossless for every [`Bitmap`].
//!
//! [`Bitmap`]: nearest_resample::Bitmap

pub mod decode;
pub mod encode;

pub use decode::{decode, decode_file};
pub use encode::encode_png;
