//! Nearest-neighbor sampling kernels.
//!
//! Both kernels work row by row: a destination row is assembled once from a
//! precomputed column map, and consecutive destination rows that sample the
//! same source row are duplicated with `extend_from_within` instead of being
//! rebuilt.

use crate::api::ResampleError;
use crate::bitmap::{buffer_len, Bitmap, CHANNELS};

/// Integer nearest-neighbor upscale: destination `(x, y)` copies source
/// `(x / factor, y / factor)`.
///
/// Every source pixel becomes a solid `factor x factor` block. A factor of
/// 1 returns a copy of the source.
pub fn upscale_integer(source: &Bitmap, factor: u32) -> Result<Bitmap, ResampleError> {
    ensure_source(source)?;
    if factor == 0 {
        return Err(ResampleError::invalid("upscale factor must be at least 1"));
    }
    if factor == 1 {
        return Ok(source.clone());
    }

    let overflow = || {
        ResampleError::invalid(format!(
            "{}x{} upscaled by {} overflows",
            source.width(),
            source.height(),
            factor
        ))
    };
    let dst_width = source.width().checked_mul(factor).ok_or_else(overflow)?;
    let dst_height = source.height().checked_mul(factor).ok_or_else(overflow)?;
    let dst_stride = dst_width as usize * CHANNELS;

    let mut pixels = Vec::with_capacity(buffer_len(dst_width, dst_height)?);
    for y in 0..source.height() {
        let row_start = pixels.len();
        for px in source.row(y).chunks_exact(CHANNELS) {
            for _ in 0..factor {
                pixels.extend_from_slice(px);
            }
        }
        for _ in 1..factor {
            pixels.extend_from_within(row_start..row_start + dst_stride);
        }
    }

    Ok(Bitmap::from_parts(dst_width, dst_height, pixels))
}

/// Nearest-neighbor resample to an exact size: destination `(x, y)` copies
/// source `(floor(x * sw / tw), floor(y * sh / th))`.
///
/// Used as the final stage after [`upscale_integer()`], but valid on its own
/// for any source and target.
pub fn resample_nearest(
    source: &Bitmap,
    target_width: u32,
    target_height: u32,
) -> Result<Bitmap, ResampleError> {
    ensure_source(source)?;
    if target_width == 0 || target_height == 0 {
        return Err(ResampleError::invalid(format!(
            "target dimensions must be positive, got {}x{}",
            target_width, target_height
        )));
    }
    if source.dimensions() == (target_width, target_height) {
        return Ok(source.clone());
    }

    let len = buffer_len(target_width, target_height)?;
    let dst_stride = target_width as usize * CHANNELS;
    let columns = sample_offsets(source.width(), target_width);

    let mut pixels = Vec::with_capacity(len);
    let mut previous: Option<(u32, usize)> = None;
    for y in 0..target_height {
        let src_y = nearest_index(y, source.height(), target_height);
        let row_start = pixels.len();

        match previous {
            Some((prev_y, prev_start)) if prev_y == src_y => {
                pixels.extend_from_within(prev_start..prev_start + dst_stride);
            }
            _ => {
                let src_row = source.row(src_y);
                for &offset in &columns {
                    pixels.extend_from_slice(&src_row[offset..offset + CHANNELS]);
                }
            }
        }
        previous = Some((src_y, row_start));
    }

    Ok(Bitmap::from_parts(target_width, target_height, pixels))
}

/// `floor(dst * src_len / dst_len)` without intermediate overflow.
#[inline]
fn nearest_index(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    (dst as u64 * src_len as u64 / dst_len as u64) as u32
}

/// Byte offset within a source row for every destination column.
fn sample_offsets(src_width: u32, dst_width: u32) -> Vec<usize> {
    (0..dst_width)
        .map(|x| nearest_index(x, src_width, dst_width) as usize * CHANNELS)
        .collect()
}

fn ensure_source(source: &Bitmap) -> Result<(), ResampleError> {
    if source.is_empty() {
        return Err(ResampleError::invalid(format!(
            "source dimensions must be positive, got {}x{}",
            source.width(),
            source.height()
        )));
    }
    Ok(())
}
