//! Typed PSMCT32 textures and 32-bit palettes using [`rgb`] crate types via bytemuck.
//!
//! ```rust
//! use rgb::Rgba;
//! use gs_swizzle::typed_rgb;
//!
//! let linear: Vec<Rgba<u8>> = (0..256u32)
//!     .map(|i| Rgba::new(i as u8, 0, 0, 0x80))
//!     .collect();
//! let tiled = typed_rgb::swizzle_rgba(&linear, 16, 16).unwrap();
//! assert_eq!(typed_rgb::unswizzle_rgba(&tiled, 16, 16).unwrap(), linear);
//! ```
//!
//! GS alpha is 0..=0x80 rather than 0..=0xFF; these functions move texels
//! and never touch channel values.

use alloc::vec;
use alloc::vec::Vec;

use rgb::Rgba;

use crate::format::{Direction, PixelFormat};
use crate::swizzle::{check_complete, check_dimensions, transform_into};
use crate::{SizeError, csm1_reorder_inplace};

// ---------------------------------------------------------------------------
// PSMCT32 textures
// ---------------------------------------------------------------------------

fn convert_rgba(
    direction: Direction,
    src: &[Rgba<u8>],
    width: usize,
    height: usize,
) -> Result<Vec<Rgba<u8>>, SizeError> {
    let src_bytes: &[u8] = bytemuck::cast_slice(src);
    check_dimensions(PixelFormat::Psmct32, src_bytes.len(), width, height)?;
    let mut out = vec![Rgba::new(0, 0, 0, 0); src.len()];
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut out);
    let format = PixelFormat::Psmct32;
    check_complete(transform_into(format, direction, src_bytes, dst_bytes, width, height))?;
    Ok(out)
}

/// Row-major RGBA texels → PSMCT32 order.
///
/// `linear.len()` must equal `width * height`, and every texel must land
/// inside the output ([`SizeError::Clamped`] otherwise).
pub fn swizzle_rgba(
    linear: &[Rgba<u8>],
    width: usize,
    height: usize,
) -> Result<Vec<Rgba<u8>>, SizeError> {
    convert_rgba(Direction::Swizzle, linear, width, height)
}

/// PSMCT32 order → row-major RGBA texels.
pub fn unswizzle_rgba(
    tiled: &[Rgba<u8>],
    width: usize,
    height: usize,
) -> Result<Vec<Rgba<u8>>, SizeError> {
    convert_rgba(Direction::Unswizzle, tiled, width, height)
}

// ---------------------------------------------------------------------------
// 32-bit palettes
// ---------------------------------------------------------------------------

/// Decode a raw 32-bit CLUT stored in CSM1 order into linear `Rgba<u8>` entries.
///
/// `clut.len()` must be a multiple of 4.
pub fn palette_from_csm1(clut: &[u8]) -> Result<Vec<Rgba<u8>>, SizeError> {
    if !clut.len().is_multiple_of(4) {
        return Err(SizeError::NotPixelAligned);
    }
    let mut entries: Vec<Rgba<u8>> = clut
        .chunks_exact(4)
        .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
        .collect();
    csm1_reorder_inplace(&mut entries);
    Ok(entries)
}

/// Encode linear `Rgba<u8>` palette entries as a raw CSM1-ordered CLUT.
pub fn palette_to_csm1(entries: &[Rgba<u8>]) -> Vec<u8> {
    let mut clut: Vec<u8> = bytemuck::cast_slice(entries).to_vec();
    let ordered: &mut [Rgba<u8>] = bytemuck::cast_slice_mut(&mut clut);
    csm1_reorder_inplace(ordered);
    clut
}
