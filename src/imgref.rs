//! Whole-image texture conversions using [`imgref`] types.
//!
//! Unswizzling produces a tightly packed [`ImgVec`]; swizzling accepts any
//! [`ImgRef`], including strided views, and returns raw GS-ordered bytes.
//! Sizes whose layout drops pixels fail with [`SizeError::Clamped`].
//!
//! ```rust
//! use ::imgref::ImgVec;
//! use gs_swizzle::imgref;
//!
//! let indices = ImgVec::new((0..=255u8).collect(), 16, 16);
//! let tiled = imgref::swizzle_indexed8(indices.as_ref()).unwrap();
//! let back = imgref::unswizzle_indexed8(&tiled, 16, 16).unwrap();
//! assert_eq!(back.buf(), indices.buf());
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::Rgba;

use crate::format::{Direction, PixelFormat, Psmt4Strategy};
use crate::swizzle::{check_complete, check_dimensions, transform_into};
use crate::{SizeError, nibble};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Copy the visible rows of a possibly strided image into one buffer.
fn compact<T: Copy>(img: ImgRef<'_, T>) -> Vec<T> {
    let mut out = Vec::with_capacity(img.width() * img.height());
    for row in img.rows() {
        out.extend_from_slice(row);
    }
    out
}

fn checked_area(width: usize, height: usize) -> Result<usize, SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::ZeroDimension);
    }
    width.checked_mul(height).ok_or(SizeError::DimensionOverflow)
}

fn convert(
    format: PixelFormat,
    direction: Direction,
    src: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, SizeError> {
    check_dimensions(format, src.len(), width, height)?;
    let mut out = vec![0u8; src.len()];
    check_complete(transform_into(format, direction, src, &mut out, width, height))?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// 8bpp indexed
// ---------------------------------------------------------------------------

/// PSMT8 bytes → image of palette indices.
pub fn unswizzle_indexed8(
    tiled: &[u8],
    width: usize,
    height: usize,
) -> Result<ImgVec<u8>, SizeError> {
    let buf = convert(PixelFormat::Psmt8, Direction::Unswizzle, tiled, width, height)?;
    Ok(ImgVec::new(buf, width, height))
}

/// Image of palette indices → PSMT8 bytes.
pub fn swizzle_indexed8(img: ImgRef<'_, u8>) -> Result<Vec<u8>, SizeError> {
    let linear = compact(img);
    convert(
        PixelFormat::Psmt8,
        Direction::Swizzle,
        &linear,
        img.width(),
        img.height(),
    )
}

// ---------------------------------------------------------------------------
// 4bpp indexed (one index per output pixel)
// ---------------------------------------------------------------------------

/// PSMT4 bytes → image of palette indices, one `u8` per pixel.
pub fn unswizzle_indexed4(
    tiled: &[u8],
    strategy: Psmt4Strategy,
    width: usize,
    height: usize,
) -> Result<ImgVec<u8>, SizeError> {
    let pixels = checked_area(width, height)?;
    let format = PixelFormat::Psmt4(strategy);
    let packed = convert(format, Direction::Unswizzle, tiled, width, height)?;
    let mut indices = vec![0u8; pixels];
    // An odd final pixel lives in the low nibble of the last byte.
    nibble::unpack(&packed[..pixels / 2], &mut indices);
    if !pixels.is_multiple_of(2) {
        indices[pixels - 1] = packed[pixels / 2] & 0x0F;
    }
    Ok(ImgVec::new(indices, width, height))
}

/// Image of palette indices (low 4 bits used) → PSMT4 bytes.
pub fn swizzle_indexed4(
    img: ImgRef<'_, u8>,
    strategy: Psmt4Strategy,
) -> Result<Vec<u8>, SizeError> {
    let pixels = checked_area(img.width(), img.height())?;
    let indices = compact(img);
    let mut packed = vec![0u8; pixels.div_ceil(2)];
    nibble::pack_nibbles(&indices, &mut packed)?;
    convert(
        PixelFormat::Psmt4(strategy),
        Direction::Swizzle,
        &packed,
        img.width(),
        img.height(),
    )
}

// ---------------------------------------------------------------------------
// 32bpp RGBA
// ---------------------------------------------------------------------------

/// PSMCT32 bytes → RGBA image.
pub fn unswizzle_rgba(
    tiled: &[u8],
    width: usize,
    height: usize,
) -> Result<ImgVec<Rgba<u8>>, SizeError> {
    check_dimensions(PixelFormat::Psmct32, tiled.len(), width, height)?;
    let mut buf = vec![Rgba::new(0, 0, 0, 0); width * height];
    let dst: &mut [u8] = bytemuck::cast_slice_mut(&mut buf);
    let format = PixelFormat::Psmct32;
    check_complete(transform_into(format, Direction::Unswizzle, tiled, dst, width, height))?;
    Ok(ImgVec::new(buf, width, height))
}

/// RGBA image → PSMCT32 bytes.
pub fn swizzle_rgba(img: ImgRef<'_, Rgba<u8>>) -> Result<Vec<u8>, SizeError> {
    let linear = compact(img);
    convert(
        PixelFormat::Psmct32,
        Direction::Swizzle,
        bytemuck::cast_slice(&linear),
        img.width(),
        img.height(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed8_round_trip() {
        let img = ImgVec::new((0..32 * 16).map(|i| (i * 5) as u8).collect(), 32, 16);
        let tiled = swizzle_indexed8(img.as_ref()).unwrap();
        assert_eq!(tiled, crate::swizzle(PixelFormat::Psmt8, img.buf(), 32, 16));
        let back = unswizzle_indexed8(&tiled, 32, 16).unwrap();
        assert_eq!(back.buf(), img.buf());
    }

    #[test]
    fn strided_source_is_compacted() {
        // 16×16 view into a 20-wide buffer; padding must not leak.
        let mut buf = vec![0xEEu8; 20 * 16];
        for y in 0..16 {
            for x in 0..16 {
                buf[y * 20 + x] = (y * 16 + x) as u8;
            }
        }
        let view = ImgRef::new_stride(&buf, 16, 16, 20);
        let tiled = swizzle_indexed8(view).unwrap();
        let dense: Vec<u8> = (0..=255).collect();
        assert_eq!(tiled, crate::swizzle(PixelFormat::Psmt8, &dense, 16, 16));
    }

    #[test]
    fn indexed4_round_trip_both_strategies() {
        for strategy in [Psmt4Strategy::Unpacked8, Psmt4Strategy::PageBlock] {
            let img = ImgVec::new((0..128 * 128).map(|i| (i % 13) as u8).collect(), 128, 128);
            let tiled = swizzle_indexed4(img.as_ref(), strategy).unwrap();
            assert_eq!(tiled.len(), 128 * 128 / 2);
            let back = unswizzle_indexed4(&tiled, strategy, 128, 128).unwrap();
            assert_eq!(back.buf(), img.buf(), "{strategy:?}");
        }
    }

    #[test]
    fn indexed4_odd_size() {
        // PageBlock maps a 3×3 image within the buffer; Unpacked8 uses the
        // PSMT8 block layout, which reaches past 9 pixels.
        let tiled = [0u8; 5];
        let img = unswizzle_indexed4(&tiled, Psmt4Strategy::PageBlock, 3, 3).unwrap();
        assert_eq!((img.width(), img.height(), img.buf().len()), (3, 3, 9));
        assert!(matches!(
            unswizzle_indexed4(&tiled, Psmt4Strategy::Unpacked8, 3, 3).err(),
            Some(SizeError::Clamped { .. })
        ));
    }

    #[test]
    fn unaligned_indexed8_is_an_error() {
        let img = ImgVec::new((1..=64u8).collect(), 8, 8);
        assert!(matches!(
            swizzle_indexed8(img.as_ref()),
            Err(SizeError::Clamped { skipped }) if skipped > 0
        ));
    }

    #[test]
    fn rgba_round_trip() {
        let pixels: Vec<Rgba<u8>> = (0..16 * 32)
            .map(|i| Rgba::new(i as u8, (i >> 8) as u8, 7, 0x80))
            .collect();
        let img = ImgVec::new(pixels, 16, 32);
        let tiled = swizzle_rgba(img.as_ref()).unwrap();
        assert_eq!(tiled.len(), 16 * 32 * 4);
        let back = unswizzle_rgba(&tiled, 16, 32).unwrap();
        assert_eq!(back.buf(), img.buf());
    }

    #[test]
    fn dimension_errors() {
        assert_eq!(
            unswizzle_indexed8(&[0; 10], 4, 4).err(),
            Some(SizeError::DimensionMismatch {
                expected: 16,
                actual: 10
            })
        );
        assert_eq!(
            unswizzle_indexed4(&[], Psmt4Strategy::PageBlock, 0, 4).err(),
            Some(SizeError::ZeroDimension)
        );
        assert_eq!(
            unswizzle_rgba(&[0; 64], 4, 8).err(),
            Some(SizeError::DimensionMismatch {
                expected: 128,
                actual: 64
            })
        );
    }
}
