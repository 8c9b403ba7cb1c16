//! Pixel formats, strategies and the per-format transform trait.

use alloc::vec::Vec;
use core::fmt;

use crate::SizeError;

/// Which of the two 4bpp arrangements a texture uses.
///
/// The container format decides this; neither is a drop-in for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Psmt4Strategy {
    /// Expand nibbles to one byte per pixel, run the PSMT8 mapping, repack.
    Unpacked8,
    /// Native PSMT4 page/block arrangement driven by the nibble LUTs.
    PageBlock,
}

/// GS pixel storage format, tagged by bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 4 bits per pixel, two pixels per byte, low nibble first.
    Psmt4(Psmt4Strategy),
    /// 8 bits per pixel.
    Psmt8,
    /// 16 bits per pixel.
    Psmct16,
    /// 32 bits per pixel.
    Psmct32,
}

impl PixelFormat {
    /// Pick a format from a declared bit depth.
    ///
    /// `strategy` is only consulted for 4bpp.
    pub const fn from_bits(bits: u32, strategy: Psmt4Strategy) -> Result<Self, SizeError> {
        match bits {
            4 => Ok(Self::Psmt4(strategy)),
            8 => Ok(Self::Psmt8),
            16 => Ok(Self::Psmct16),
            32 => Ok(Self::Psmct32),
            other => Err(SizeError::UnsupportedDepth(other)),
        }
    }

    #[inline]
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Psmt4(_) => 4,
            Self::Psmt8 => 8,
            Self::Psmct16 => 16,
            Self::Psmct32 => 32,
        }
    }

    /// Byte length of a `width × height` image in this format.
    ///
    /// Odd 4bpp pixel counts round up to a whole byte. `None` on overflow.
    pub const fn buffer_len(self, width: usize, height: usize) -> Option<usize> {
        let Some(pixels) = width.checked_mul(height) else {
            return None;
        };
        match self {
            Self::Psmt4(_) => Some(pixels.div_ceil(2)),
            Self::Psmt8 => Some(pixels),
            Self::Psmct16 => pixels.checked_mul(2),
            Self::Psmct32 => pixels.checked_mul(4),
        }
    }

    /// Width/height multiples for which swizzle and unswizzle are exact inverses.
    pub const fn tile_granularity(self) -> (usize, usize) {
        match self {
            Self::Psmt4(Psmt4Strategy::PageBlock) => (128, 128),
            Self::Psmt4(Psmt4Strategy::Unpacked8) | Self::Psmt8 | Self::Psmct32 => (16, 16),
            Self::Psmct16 => (64, 64),
        }
    }

    #[inline]
    pub const fn is_aligned(self, width: usize, height: usize) -> bool {
        let (tw, th) = self.tile_granularity();
        width != 0 && height != 0 && width.is_multiple_of(tw) && height.is_multiple_of(th)
    }

    /// The engine implementing this format.
    pub fn engine(self) -> &'static dyn PixelFormatTransform {
        match self {
            Self::Psmt4(Psmt4Strategy::Unpacked8) => &crate::psmt4::Unpacked8,
            Self::Psmt4(Psmt4Strategy::PageBlock) => &crate::psmt4::PageBlock,
            Self::Psmt8 => &crate::linear::Psmt8,
            Self::Psmct16 => &crate::linear::Psmct16,
            Self::Psmct32 => &crate::linear::Psmct32,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Psmt4(Psmt4Strategy::Unpacked8) => f.write_str("PSMT4 (unpacked8)"),
            Self::Psmt4(Psmt4Strategy::PageBlock) => f.write_str("PSMT4 (page/block)"),
            Self::Psmt8 => f.write_str("PSMT8"),
            Self::Psmct16 => f.write_str("PSMCT16"),
            Self::Psmct32 => f.write_str("PSMCT32"),
        }
    }
}

/// Direction of a layout conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Linear (row-major) → GS tiled.
    Swizzle,
    /// GS tiled → linear.
    Unswizzle,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Swizzle => "swizzle",
            Self::Unswizzle => "unswizzle",
        })
    }
}

/// One bit depth's pair of layout conversions.
///
/// Implementations write into a zero-filled destination of the format's
/// [`buffer_len`](PixelFormat::buffer_len) and return how many element or span
/// copies were dropped because an address fell outside either buffer.
pub trait PixelFormatTransform: Sync {
    fn bits_per_pixel(&self) -> u32;

    /// Linear → tiled.
    fn swizzle_into(&self, linear: &[u8], tiled: &mut [u8], width: usize, height: usize) -> usize;

    /// Tiled → linear.
    fn unswizzle_into(&self, tiled: &[u8], linear: &mut [u8], width: usize, height: usize)
    -> usize;

    fn transform_into(
        &self,
        direction: Direction,
        src: &[u8],
        dst: &mut [u8],
        width: usize,
        height: usize,
    ) -> usize {
        match direction {
            Direction::Swizzle => self.swizzle_into(src, dst, width, height),
            Direction::Unswizzle => self.unswizzle_into(src, dst, width, height),
        }
    }
}

/// Output of a transform: the converted buffer plus how much was clamped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transformed {
    /// Converted bytes, always `buffer_len(width, height)` long.
    pub data: Vec<u8>,
    /// Element or span copies dropped because an address was out of range.
    pub skipped: usize,
}

impl Transformed {
    /// `true` when every copy landed in bounds.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }

    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

/// Copy `len` bytes between two offsets, or do nothing if either range is
/// out of bounds. Returns whether the copy happened.
#[inline]
pub(crate) fn copy_span(src: &[u8], from: usize, dst: &mut [u8], to: usize, len: usize) -> bool {
    match (
        src.get(from..).and_then(|s| s.get(..len)),
        dst.get_mut(to..).and_then(|d| d.get_mut(..len)),
    ) {
        (Some(s), Some(d)) => {
            d.copy_from_slice(s);
            true
        }
        _ => false,
    }
}
