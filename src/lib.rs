//! Crispscale - pixel-perfect image resizing
//!
//! Batch front end for the `nearest-resample` crate: decoding, PNG
//! encoding, output naming, zip packaging and configuration.
//! This library exposes modules for integration testing.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;
