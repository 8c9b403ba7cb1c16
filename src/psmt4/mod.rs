// ---------------------------------------------------------------------------
// PSMT4 (4bpp) engines.
//
// PageBlock: the bitmap is cut into 128×128 pixel pages. A linear page is
// 64 bytes × 128 rows; its tiled form is a PSMCT32 page, 256 bytes × 32
// rows. Each page holds 32 blocks of 32×16 pixels (256 bytes) whose nibbles
// are permuted by the LUTs in `tables`; everything around the LUT step is
// plain span copying.
//
// Unpacked8: nibbles are expanded to bytes, moved with the PSMT8 mapping
// and packed again.
// ---------------------------------------------------------------------------

use alloc::vec;

use crate::format::{Direction, PixelFormatTransform, copy_span};
use crate::linear::{psmt8_swizzle, psmt8_unswizzle};
use crate::nibble;

mod tables;
use tables::*;


const PAGE_WIDTH: usize = 128;
const PAGE_HEIGHT: usize = 128;
const PAGE_BYTES: usize = PAGE_WIDTH / 2 * PAGE_HEIGHT;

/// Row stride of a linear page in bytes.
const LINEAR_PAGE_STRIDE: usize = PAGE_WIDTH / 2;
/// Row stride of a tiled (PSMCT32, 64 words wide) page in bytes.
const TILED_PAGE_STRIDE: usize = 64 * 4;
const TILED_PAGE_ROWS: usize = PAGE_BYTES / TILED_PAGE_STRIDE;

const BLOCK_BYTES: usize = 256;
const BLOCKS_PER_PAGE_ROW: usize = 4;
/// Linear block: 16 rows of 16 bytes (32 pixels).
const LINEAR_BLOCK_ROW: usize = 16;
const LINEAR_BLOCK_ROWS: usize = 16;
/// Tiled block: 8 rows of 32 bytes.
const TILED_BLOCK_ROW: usize = 32;
const TILED_BLOCK_ROWS: usize = 8;

/// How an image is split into pages and which spans of each page are
/// copied in or out.
///
/// An image narrower or shorter than one page only fills part of it, and
/// the span sizes shrink with it: the width decides the linear span and the
/// number of tiled rows, the height decides the number of linear rows and
/// the tiled span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageGeometry {
    pages_wide: usize,
    pages_high: usize,
    linear_span: usize,
    linear_rows: usize,
    tiled_span: usize,
    tiled_rows: usize,
}

impl PageGeometry {
    fn new(width: usize, height: usize) -> Self {
        let pages_wide = width.div_ceil(PAGE_WIDTH);
        let pages_high = height.div_ceil(PAGE_HEIGHT);
        let (linear_span, tiled_rows) = if pages_wide == 1 {
            (width / 2, width / 4)
        } else {
            (LINEAR_PAGE_STRIDE, TILED_PAGE_ROWS)
        };
        let (linear_rows, tiled_span) = if pages_high == 1 {
            (height, height * 2)
        } else {
            (PAGE_HEIGHT, TILED_PAGE_STRIDE)
        };
        Self {
            pages_wide,
            pages_high,
            linear_span,
            linear_rows,
            tiled_span,
            tiled_rows,
        }
    }

    /// Offset of row `k` of page (`page_row`, `page_col`) in an image-side
    /// buffer made of `span`-byte, `rows`-row page slices interleaved row by row.
    #[inline]
    fn offset(
        &self,
        span: usize,
        rows: usize,
        page_row: usize,
        page_col: usize,
        k: usize,
    ) -> usize {
        span * (rows * self.pages_wide * page_row + page_col + k * self.pages_wide)
    }
}

#[inline(always)]
fn nibble_at(bytes: &[u8], pos: u8) -> u8 {
    (bytes[usize::from(pos >> 1)] >> ((pos & 1) * 4)) & 0x0F
}

/// Permute the 512 nibbles of one block.
///
/// Each 64-byte quarter is rebuilt from itself using one half of `lut`.
fn convert_block(lut: &[u8; 256], src: &[u8; BLOCK_BYTES], dst: &mut [u8; BLOCK_BYTES]) {
    let quarters = src.chunks_exact(64).zip(dst.chunks_exact_mut(64));
    for (quarter, (src_q, dst_q)) in quarters.enumerate() {
        let half = &lut[(quarter % 2) * 128..][..128];
        for (out, pos) in dst_q.iter_mut().zip(half.chunks_exact(2)) {
            *out = nibble_at(src_q, pos[0]) | (nibble_at(src_q, pos[1]) << 4);
        }
    }
}

#[inline]
fn linear_block_origin(slot: usize) -> usize {
    let (row, col) = (slot / BLOCKS_PER_PAGE_ROW, slot % BLOCKS_PER_PAGE_ROW);
    row * LINEAR_BLOCK_ROWS * LINEAR_PAGE_STRIDE + col * LINEAR_BLOCK_ROW
}

#[inline]
fn tiled_block_origin(block: u8) -> usize {
    let b = usize::from(block);
    usize::from(BLOCK32_ROW[b]) * TILED_BLOCK_ROWS * TILED_PAGE_STRIDE
        + usize::from(BLOCK32_COLUMN[b]) * TILED_BLOCK_ROW
}

fn swizzle_page(linear: &[u8; PAGE_BYTES], tiled: &mut [u8; PAGE_BYTES]) {
    let mut block_in = [0u8; BLOCK_BYTES];
    let mut block_out = [0u8; BLOCK_BYTES];
    for (slot, &block) in PSMT4_BLOCK_ORDER.iter().enumerate() {
        let base = linear_block_origin(slot);
        for (k, row) in block_in.chunks_exact_mut(LINEAR_BLOCK_ROW).enumerate() {
            let at = base + k * LINEAR_PAGE_STRIDE;
            row.copy_from_slice(&linear[at..at + LINEAR_BLOCK_ROW]);
        }
        convert_block(&SWIZZLE_NIBBLE_LUT, &block_in, &mut block_out);
        let base = tiled_block_origin(block);
        for (k, row) in block_out.chunks_exact(TILED_BLOCK_ROW).enumerate() {
            let at = base + k * TILED_PAGE_STRIDE;
            tiled[at..at + TILED_BLOCK_ROW].copy_from_slice(row);
        }
    }
}

fn unswizzle_page(tiled: &[u8; PAGE_BYTES], linear: &mut [u8; PAGE_BYTES]) {
    let mut block_in = [0u8; BLOCK_BYTES];
    let mut block_out = [0u8; BLOCK_BYTES];
    for (slot, &block) in PSMT4_BLOCK_ORDER.iter().enumerate() {
        let base = tiled_block_origin(block);
        for (k, row) in block_in.chunks_exact_mut(TILED_BLOCK_ROW).enumerate() {
            let at = base + k * TILED_PAGE_STRIDE;
            row.copy_from_slice(&tiled[at..at + TILED_BLOCK_ROW]);
        }
        convert_block(&UNSWIZZLE_NIBBLE_LUT, &block_in, &mut block_out);
        let base = linear_block_origin(slot);
        for (k, row) in block_out.chunks_exact(LINEAR_BLOCK_ROW).enumerate() {
            let at = base + k * LINEAR_PAGE_STRIDE;
            linear[at..at + LINEAR_BLOCK_ROW].copy_from_slice(row);
        }
    }
}

fn transform_pages(
    direction: Direction,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> usize {
    let geo = PageGeometry::new(width, height);
    let (in_span, in_rows, in_stride, out_span, out_rows, out_stride) = match direction {
        Direction::Swizzle => (
            geo.linear_span,
            geo.linear_rows,
            LINEAR_PAGE_STRIDE,
            geo.tiled_span,
            geo.tiled_rows,
            TILED_PAGE_STRIDE,
        ),
        Direction::Unswizzle => (
            geo.tiled_span,
            geo.tiled_rows,
            TILED_PAGE_STRIDE,
            geo.linear_span,
            geo.linear_rows,
            LINEAR_PAGE_STRIDE,
        ),
    };

    let mut page_in = [0u8; PAGE_BYTES];
    let mut page_out = [0u8; PAGE_BYTES];
    let mut skipped = 0;
    for page_row in 0..geo.pages_high {
        for page_col in 0..geo.pages_wide {
            page_in.fill(0);
            for k in 0..in_rows {
                let from = geo.offset(in_span, in_rows, page_row, page_col, k);
                if !copy_span(src, from, &mut page_in, k * in_stride, in_span) {
                    skipped += 1;
                }
            }
            match direction {
                Direction::Swizzle => swizzle_page(&page_in, &mut page_out),
                Direction::Unswizzle => unswizzle_page(&page_in, &mut page_out),
            }
            for k in 0..out_rows {
                let to = geo.offset(out_span, out_rows, page_row, page_col, k);
                if !copy_span(&page_out, k * out_stride, dst, to, out_span) {
                    skipped += 1;
                }
            }
        }
    }
    skipped
}

fn transform_unpacked(
    direction: Direction,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> usize {
    let Some(pixels) = width.checked_mul(height) else {
        return 0;
    };
    let packed_len = pixels.div_ceil(2);
    let mut skipped = packed_len.saturating_sub(src.len()) + packed_len.saturating_sub(dst.len());

    let mut wide = vec![0u8; pixels];
    let whole = (pixels / 2).min(src.len());
    nibble::unpack(&src[..whole], &mut wide);
    if !pixels.is_multiple_of(2) {
        if let Some(&last) = src.get(pixels / 2) {
            wide[pixels - 1] = last & 0x0F;
        }
    }

    let mut moved = vec![0u8; pixels];
    skipped += match direction {
        Direction::Swizzle => psmt8_swizzle(&wide, &mut moved, width, height),
        Direction::Unswizzle => psmt8_unswizzle(&wide, &mut moved, width, height),
    };
    nibble::pack(&moved, dst);
    skipped
}

/// PSMT4 through the PSMT8 mapping on unpacked nibbles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpacked8;

/// Native PSMT4 page/block arrangement.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageBlock;

impl PixelFormatTransform for Unpacked8 {
    fn bits_per_pixel(&self) -> u32 {
        4
    }

    fn swizzle_into(&self, linear: &[u8], tiled: &mut [u8], width: usize, height: usize) -> usize {
        transform_unpacked(Direction::Swizzle, linear, tiled, width, height)
    }

    fn unswizzle_into(
        &self,
        tiled: &[u8],
        linear: &mut [u8],
        width: usize,
        height: usize,
    ) -> usize {
        transform_unpacked(Direction::Unswizzle, tiled, linear, width, height)
    }
}

impl PixelFormatTransform for PageBlock {
    fn bits_per_pixel(&self) -> u32 {
        4
    }

    fn swizzle_into(&self, linear: &[u8], tiled: &mut [u8], width: usize, height: usize) -> usize {
        transform_pages(Direction::Swizzle, linear, tiled, width, height)
    }

    fn unswizzle_into(
        &self,
        tiled: &[u8],
        linear: &mut [u8],
        width: usize,
        height: usize,
    ) -> usize {
        transform_pages(Direction::Unswizzle, tiled, linear, width, height)
    }
}
