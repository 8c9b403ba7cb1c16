// ---------------------------------------------------------------------------
// Closed-form address mapping for PSMT8, PSMCT16 and PSMCT32.
//
// Each pixel (x, y) has one linear element index (y * width + x) and one
// tiled element index from the address function. Swizzle copies linear →
// tiled, unswizzle copies tiled → linear; the same function serves both so
// the two directions are one bijection read opposite ways.
// ---------------------------------------------------------------------------

use crate::format::{Direction, PixelFormatTransform, copy_span};

/// Tiled element index of pixel `(x, y)` in a PSMT8 image `width` wide.
///
/// Pixels are grouped into 16×16 blocks. Each 16-row band is stored as eight
/// rows of `2 * width` elements, with every 4-pixel column group spread
/// across the four bytes of a 32-bit word and alternate row pairs rotated
/// by four columns.
///
/// PSMCT32 uses the same index over 4-byte elements.
#[inline]
pub const fn psmt8_address(x: usize, y: usize, width: usize) -> usize {
    let block = (y & !0xF) * width + (x & !0xF) * 2;
    let swap = (((y + 2) >> 2) & 1) * 4;
    let row_sel = (((y & !3) >> 1) + (y & 1)) & 7;
    let column = row_sel * width * 2 + ((x + swap) & 7) * 4;
    let byte_sel = ((y >> 1) & 1) + ((x >> 2) & 2);
    block + column + byte_sel
}

/// Tiled element index (2-byte units) of pixel `(x, y)` in a PSMCT16 image.
///
/// 64×64 pixel pages are viewed as 64×32 32-bit words. Inside a page the
/// coordinate bits are interleaved and bit 3 of `x` picks the half-word.
/// Images narrower than 16 pixels are stored unswizzled.
#[inline]
pub const fn psmct16_address(x: usize, y: usize, width: usize) -> usize {
    if width < 16 {
        return y * width + x;
    }
    let page_x = x >> 6;
    let page_y = y >> 6;
    let col = (y & 0x38) + (x & 0x07);
    let row = ((x & 0x30) >> 1) + (y & 0x07);
    let half = (x >> 3) & 1;
    let word = ((page_y << 5) + row) * width + (page_x << 6) + col;
    word * 2 + half
}

/// Move every pixel between its linear and tiled index.
///
/// `elem` is the element size in bytes. Returns the number of pixels whose
/// source or destination fell outside the buffers.
fn map_elements(
    direction: Direction,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    elem: usize,
    address: fn(usize, usize, usize) -> usize,
) -> usize {
    let mut skipped = 0;
    for y in 0..height {
        for x in 0..width {
            let linear = y * width + x;
            let tiled = address(x, y, width);
            let (from, to) = match direction {
                Direction::Swizzle => (linear, tiled),
                Direction::Unswizzle => (tiled, linear),
            };
            if !copy_span(src, from * elem, dst, to * elem, elem) {
                skipped += 1;
            }
        }
    }
    skipped
}

// 8bpp keeps its own loop: single-byte moves dominate the 4bpp shortcut too.
fn map_bytes(
    direction: Direction,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> usize {
    let mut skipped = 0;
    for y in 0..height {
        for x in 0..width {
            let linear = y * width + x;
            let tiled = psmt8_address(x, y, width);
            let (from, to) = match direction {
                Direction::Swizzle => (linear, tiled),
                Direction::Unswizzle => (tiled, linear),
            };
            match (src.get(from), dst.get_mut(to)) {
                (Some(&s), Some(d)) => *d = s,
                _ => skipped += 1,
            }
        }
    }
    skipped
}

pub(crate) fn psmt8_swizzle(linear: &[u8], tiled: &mut [u8], width: usize, height: usize) -> usize {
    map_bytes(Direction::Swizzle, linear, tiled, width, height)
}

pub(crate) fn psmt8_unswizzle(
    tiled: &[u8],
    linear: &mut [u8],
    width: usize,
    height: usize,
) -> usize {
    map_bytes(Direction::Unswizzle, tiled, linear, width, height)
}

/// PSMT8 engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Psmt8;

/// PSMCT16 engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Psmct16;

/// PSMCT32 engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Psmct32;

impl PixelFormatTransform for Psmt8 {
    fn bits_per_pixel(&self) -> u32 {
        8
    }

    fn swizzle_into(&self, linear: &[u8], tiled: &mut [u8], width: usize, height: usize) -> usize {
        psmt8_swizzle(linear, tiled, width, height)
    }

    fn unswizzle_into(
        &self,
        tiled: &[u8],
        linear: &mut [u8],
        width: usize,
        height: usize,
    ) -> usize {
        psmt8_unswizzle(tiled, linear, width, height)
    }
}

impl PixelFormatTransform for Psmct16 {
    fn bits_per_pixel(&self) -> u32 {
        16
    }

    fn swizzle_into(&self, linear: &[u8], tiled: &mut [u8], width: usize, height: usize) -> usize {
        map_elements(Direction::Swizzle, linear, tiled, width, height, 2, psmct16_address)
    }

    fn unswizzle_into(
        &self,
        tiled: &[u8],
        linear: &mut [u8],
        width: usize,
        height: usize,
    ) -> usize {
        map_elements(Direction::Unswizzle, tiled, linear, width, height, 2, psmct16_address)
    }
}

impl PixelFormatTransform for Psmct32 {
    fn bits_per_pixel(&self) -> u32 {
        32
    }

    fn swizzle_into(&self, linear: &[u8], tiled: &mut [u8], width: usize, height: usize) -> usize {
        map_elements(Direction::Swizzle, linear, tiled, width, height, 4, psmt8_address)
    }

    fn unswizzle_into(
        &self,
        tiled: &[u8],
        linear: &mut [u8],
        width: usize,
        height: usize,
    ) -> usize {
        map_elements(Direction::Unswizzle, tiled, linear, width, height, 4, psmt8_address)
    }
}
