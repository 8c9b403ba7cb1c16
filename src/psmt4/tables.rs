//! Fixed permutation tables for the PSMT4 page/block engine.
//!
//! Immutable data; shared freely across threads.

/// PSMCT32 block layout of a page: entry `n` is the block number stored at
/// grid slot `n`, with slots numbered row-major over an 8 × 4 grid of
/// 32-byte × 8-row blocks.
pub(crate) const PSMCT32_BLOCK_ORDER: [u8; 32] = [
    0, 1, 4, 5, 16, 17, 20, 21, 2, 3, 6, 7, 18, 19, 22, 23,
    8, 9, 12, 13, 24, 25, 28, 29, 10, 11, 14, 15, 26, 27, 30, 31,
];

/// Block number that receives each 32 × 16 pixel block of a PSMT4 page,
/// visited row-major over the page's 4 × 8 block grid.
pub(crate) const PSMT4_BLOCK_ORDER: [u8; 32] = [
    0, 2, 8, 10, 1, 3, 9, 11, 4, 6, 12, 14, 5, 7, 13, 15,
    16, 18, 24, 26, 17, 19, 25, 27, 20, 22, 28, 30, 21, 23, 29, 31,
];

/// Nibble source positions for tiled → linear block conversion.
///
/// Each 64-byte quarter of a block reads one 128-entry half: even quarters
/// the first, odd quarters the second. Entries index nibbles within the
/// quarter (`byte * 2 + high`).
pub(crate) const UNSWIZZLE_NIBBLE_LUT: [u8; 256] = [
    0, 8, 16, 24, 32, 40, 48, 56, 2, 10, 18, 26, 34, 42, 50, 58,
    4, 12, 20, 28, 36, 44, 52, 60, 6, 14, 22, 30, 38, 46, 54, 62,
    64, 72, 80, 88, 96, 104, 112, 120, 66, 74, 82, 90, 98, 106, 114, 122,
    68, 76, 84, 92, 100, 108, 116, 124, 70, 78, 86, 94, 102, 110, 118, 126,
    33, 41, 49, 57, 1, 9, 17, 25, 35, 43, 51, 59, 3, 11, 19, 27,
    37, 45, 53, 61, 5, 13, 21, 29, 39, 47, 55, 63, 7, 15, 23, 31,
    97, 105, 113, 121, 65, 73, 81, 89, 99, 107, 115, 123, 67, 75, 83, 91,
    101, 109, 117, 125, 69, 77, 85, 93, 103, 111, 119, 127, 71, 79, 87, 95,
    32, 40, 48, 56, 0, 8, 16, 24, 34, 42, 50, 58, 2, 10, 18, 26,
    36, 44, 52, 60, 4, 12, 20, 28, 38, 46, 54, 62, 6, 14, 22, 30,
    96, 104, 112, 120, 64, 72, 80, 88, 98, 106, 114, 122, 66, 74, 82, 90,
    100, 108, 116, 124, 68, 76, 84, 92, 102, 110, 118, 126, 70, 78, 86, 94,
    1, 9, 17, 25, 33, 41, 49, 57, 3, 11, 19, 27, 35, 43, 51, 59,
    5, 13, 21, 29, 37, 45, 53, 61, 7, 15, 23, 31, 39, 47, 55, 63,
    65, 73, 81, 89, 97, 105, 113, 121, 67, 75, 83, 91, 99, 107, 115, 123,
    69, 77, 85, 93, 101, 109, 117, 125, 71, 79, 87, 95, 103, 111, 119, 127,
];

/// Nibble source positions for linear → tiled block conversion. Each half is
/// the inverse permutation of the matching half of [`UNSWIZZLE_NIBBLE_LUT`].
pub(crate) const SWIZZLE_NIBBLE_LUT: [u8; 256] = [
    0, 68, 8, 76, 16, 84, 24, 92, 1, 69, 9, 77, 17, 85, 25, 93,
    2, 70, 10, 78, 18, 86, 26, 94, 3, 71, 11, 79, 19, 87, 27, 95,
    4, 64, 12, 72, 20, 80, 28, 88, 5, 65, 13, 73, 21, 81, 29, 89,
    6, 66, 14, 74, 22, 82, 30, 90, 7, 67, 15, 75, 23, 83, 31, 91,
    32, 100, 40, 108, 48, 116, 56, 124, 33, 101, 41, 109, 49, 117, 57, 125,
    34, 102, 42, 110, 50, 118, 58, 126, 35, 103, 43, 111, 51, 119, 59, 127,
    36, 96, 44, 104, 52, 112, 60, 120, 37, 97, 45, 105, 53, 113, 61, 121,
    38, 98, 46, 106, 54, 114, 62, 122, 39, 99, 47, 107, 55, 115, 63, 123,
    4, 64, 12, 72, 20, 80, 28, 88, 5, 65, 13, 73, 21, 81, 29, 89,
    6, 66, 14, 74, 22, 82, 30, 90, 7, 67, 15, 75, 23, 83, 31, 91,
    0, 68, 8, 76, 16, 84, 24, 92, 1, 69, 9, 77, 17, 85, 25, 93,
    2, 70, 10, 78, 18, 86, 26, 94, 3, 71, 11, 79, 19, 87, 27, 95,
    36, 96, 44, 104, 52, 112, 60, 120, 37, 97, 45, 105, 53, 113, 61, 121,
    38, 98, 46, 106, 54, 114, 62, 122, 39, 99, 47, 107, 55, 115, 63, 123,
    32, 100, 40, 108, 48, 116, 56, 124, 33, 101, 41, 109, 49, 117, 57, 125,
    34, 102, 42, 110, 50, 118, 58, 126, 35, 103, 43, 111, 51, 119, 59, 127,
];

const fn block32_grid() -> ([u8; 32], [u8; 32]) {
    let mut column = [0u8; 32];
    let mut row = [0u8; 32];
    let mut slot = 0;
    while slot < 32 {
        let block = PSMCT32_BLOCK_ORDER[slot] as usize;
        column[block] = (slot % 8) as u8;
        row[block] = (slot / 8) as u8;
        slot += 1;
    }
    (column, row)
}

const GRID: ([u8; 32], [u8; 32]) = block32_grid();

/// Horizontal grid slot (0..8) of each PSMCT32 block number.
pub(crate) const BLOCK32_COLUMN: [u8; 32] = GRID.0;

/// Vertical grid slot (0..4) of each PSMCT32 block number.
pub(crate) const BLOCK32_ROW: [u8; 32] = GRID.1;
