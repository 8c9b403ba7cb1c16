// ---------------------------------------------------------------------------
// Nibble kernels for 4bpp data, with SIMD dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops.
// #[arcane] wrappers are the incant! dispatch targets. 4bpp bytes hold the
// even pixel in the low nibble and the odd pixel in the high nibble.
// ---------------------------------------------------------------------------

use crate::SizeError;
use archmage::incant;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(test)]
mod tests;

/// Expand packed 4bpp to one byte per pixel.
///
/// `dst[2i]` receives the low nibble of `src[i]`, `dst[2i + 1]` the high
/// nibble. `dst` must hold at least `2 * src.len()` bytes; bytes past that
/// are left alone.
pub fn unpack_nibbles(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    match src.len().checked_mul(2) {
        Some(n) if n <= dst.len() => {}
        _ => return Err(SizeError::PixelCountMismatch),
    }
    unpack(src, dst);
    Ok(())
}

/// Pack one-byte-per-pixel indices back into 4bpp, keeping the low 4 bits
/// of each.
///
/// An odd trailing pixel fills the low nibble of the last byte and leaves the
/// high nibble zero. `dst` must hold at least `src.len().div_ceil(2)` bytes.
pub fn pack_nibbles(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    if dst.len() < src.len().div_ceil(2) {
        return Err(SizeError::PixelCountMismatch);
    }
    pack(src, dst);
    Ok(())
}

/// Exchange the high and low nibble of every byte in place.
///
/// Converts 4bpp data between low-nibble-first and high-nibble-first pixel
/// order. Its own inverse.
pub fn swap_nibbles_inplace(buf: &mut [u8]) {
    incant!(swap_impl(buf), [v3, scalar]);
}

/// Copy `src` into `dst`, exchanging the nibbles of every byte.
pub fn swap_nibbles(src: &[u8], dst: &mut [u8]) -> Result<(), SizeError> {
    if dst.len() < src.len() {
        return Err(SizeError::PixelCountMismatch);
    }
    incant!(copy_swap_impl(src, dst), [v3, scalar]);
    Ok(())
}

// Unchecked entry points for the 4bpp engine. The kernels stop at whichever
// buffer runs out first.

#[inline]
pub(crate) fn unpack(src: &[u8], dst: &mut [u8]) {
    incant!(unpack_impl(src, dst), [v3, scalar]);
}

#[inline]
pub(crate) fn pack(src: &[u8], dst: &mut [u8]) {
    incant!(pack_impl(src, dst), [v3, scalar]);
}
