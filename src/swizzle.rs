// ---------------------------------------------------------------------------
// Whole-buffer swizzle / unswizzle with format dispatch.
//
// Architecture: `PixelFormat::engine()` picks one `PixelFormatTransform`
// per call. The plain entry points never fail and always return a buffer of
// `buffer_len(width, height)` bytes; the `_checked` entry points validate
// dimensions against the buffer first.
// ---------------------------------------------------------------------------

use alloc::vec;
use alloc::vec::Vec;

use crate::SizeError;
use crate::format::{Direction, PixelFormat, Transformed};

// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
pub(crate) fn check_dimensions(
    format: PixelFormat,
    len: usize,
    width: usize,
    height: usize,
) -> Result<(), SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::ZeroDimension);
    }
    let expected = format
        .buffer_len(width, height)
        .ok_or(SizeError::DimensionOverflow)?;
    if len != expected {
        return Err(SizeError::DimensionMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Turn a clamp count into the checked entry points' error.
#[inline]
pub(crate) fn check_complete(skipped: usize) -> Result<(), SizeError> {
    if skipped == 0 {
        Ok(())
    } else {
        Err(SizeError::Clamped { skipped })
    }
}

// ===========================================================================
// Reporting entry points
// ===========================================================================

/// Convert `src` in `direction`, reporting how many copies were clamped.
///
/// Out-of-range reads and writes are dropped rather than failing, so a
/// truncated or corrupt dump still yields partial output. `data` is always
/// `format.buffer_len(width, height)` bytes, zero where nothing landed;
/// empty when a dimension is zero or the size overflows.
pub fn transform(
    format: PixelFormat,
    direction: Direction,
    src: &[u8],
    width: usize,
    height: usize,
) -> Transformed {
    let Some(len) = format.buffer_len(width, height) else {
        log::warn!("{format} {direction}: {width}x{height} overflows the address space");
        return Transformed::default();
    };
    if len == 0 {
        return Transformed::default();
    }
    if !format.is_aligned(width, height) {
        let (tw, th) = format.tile_granularity();
        log::debug!("{format} {direction}: {width}x{height} is not a multiple of {tw}x{th}");
    }

    let mut data = vec![0u8; len];
    let skipped = transform_into(format, direction, src, &mut data, width, height);
    Transformed { data, skipped }
}

/// Run the engine into a caller-sized destination and log the outcome.
pub(crate) fn transform_into(
    format: PixelFormat,
    direction: Direction,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> usize {
    log::trace!("{format} {direction}: {width}x{height}, {} bytes in", src.len());
    let skipped = format
        .engine()
        .transform_into(direction, src, dst, width, height);
    if skipped > 0 {
        log::warn!(
            "{format} {direction}: {width}x{height} clamped {skipped} copies ({} of {} bytes)",
            src.len(),
            dst.len()
        );
    }
    skipped
}

/// Linear → tiled, with clamp report.
#[inline]
pub fn swizzle_report(
    format: PixelFormat,
    linear: &[u8],
    width: usize,
    height: usize,
) -> Transformed {
    transform(format, Direction::Swizzle, linear, width, height)
}

/// Tiled → linear, with clamp report.
#[inline]
pub fn unswizzle_report(
    format: PixelFormat,
    tiled: &[u8],
    width: usize,
    height: usize,
) -> Transformed {
    transform(format, Direction::Unswizzle, tiled, width, height)
}

// ===========================================================================
// Plain entry points
// ===========================================================================

/// Rearrange a row-major buffer into GS local-memory order.
///
/// ```
/// use gs_swizzle::{PixelFormat, swizzle, unswizzle};
///
/// let linear: Vec<u8> = (0..=255).collect();
/// let tiled = swizzle(PixelFormat::Psmt8, &linear, 16, 16);
/// assert_eq!(unswizzle(PixelFormat::Psmt8, &tiled, 16, 16), linear);
/// ```
#[inline]
pub fn swizzle(format: PixelFormat, linear: &[u8], width: usize, height: usize) -> Vec<u8> {
    swizzle_report(format, linear, width, height).into_inner()
}

/// Rearrange a GS local-memory buffer into row-major order.
#[inline]
pub fn unswizzle(format: PixelFormat, tiled: &[u8], width: usize, height: usize) -> Vec<u8> {
    unswizzle_report(format, tiled, width, height).into_inner()
}

// ===========================================================================
// Checked entry points
// ===========================================================================

/// [`swizzle`] that first requires `linear.len() == format.buffer_len(width, height)`
/// and non-zero dimensions.
///
/// Fails with [`SizeError::Clamped`] when the dimensions are valid but the
/// layout still drops pixels, as for sizes off the tile granularity.
pub fn swizzle_checked(
    format: PixelFormat,
    linear: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, SizeError> {
    check_dimensions(format, linear.len(), width, height)?;
    let out = swizzle_report(format, linear, width, height);
    check_complete(out.skipped)?;
    Ok(out.data)
}

/// [`unswizzle`] that first requires `tiled.len() == format.buffer_len(width, height)`
/// and non-zero dimensions. Clamping is an error, as in [`swizzle_checked`].
pub fn unswizzle_checked(
    format: PixelFormat,
    tiled: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, SizeError> {
    check_dimensions(format, tiled.len(), width, height)?;
    let out = unswizzle_report(format, tiled, width, height);
    check_complete(out.skipped)?;
    Ok(out.data)
}
