//! CSM1 palette (CLUT) reordering.
//!
//! The hardware stores each run of 32 palette entries with its second and
//! third groups of eight exchanged: `[0..8] [16..24] [8..16] [24..32]`.
//! The same exchange converts in both directions. A trailing run shorter
//! than 32 entries, including a whole 16-entry palette, is left as is.

use alloc::vec::Vec;

use crate::SizeError;

const GROUP: usize = 32;
const OCTET: usize = 8;

/// Reorder palette entries between linear and CSM1 order, in place.
///
/// Works on any entry type: `u16`, `u32`, `[u8; 4]`, `Rgba<u8>`.
pub fn csm1_reorder_inplace<T: Copy>(entries: &mut [T]) {
    reorder_units(entries, 1);
}

/// Copying form of [`csm1_reorder_inplace`].
pub fn csm1_reorder<T: Copy>(entries: &[T]) -> Vec<T> {
    let mut out = entries.to_vec();
    csm1_reorder_inplace(&mut out);
    out
}

/// Reorder a raw palette table of `entry_width`-byte entries.
///
/// `entry_width` must be 2 or 4 and `entries.len()` a multiple of it.
pub fn swap_palette_csm1(entries: &[u8], entry_width: usize) -> Result<Vec<u8>, SizeError> {
    check_entry_width(entries.len(), entry_width)?;
    let mut out = entries.to_vec();
    reorder_units(&mut out, entry_width);
    Ok(out)
}

/// In-place form of [`swap_palette_csm1`].
pub fn swap_palette_csm1_inplace(entries: &mut [u8], entry_width: usize) -> Result<(), SizeError> {
    check_entry_width(entries.len(), entry_width)?;
    reorder_units(entries, entry_width);
    Ok(())
}

fn check_entry_width(len: usize, entry_width: usize) -> Result<(), SizeError> {
    if entry_width != 2 && entry_width != 4 {
        return Err(SizeError::UnsupportedEntryWidth(entry_width));
    }
    if !len.is_multiple_of(entry_width) {
        return Err(SizeError::NotPixelAligned);
    }
    Ok(())
}

/// Swap octets 1 and 2 of every full group, where one entry is `unit`
/// consecutive elements of `data`.
fn reorder_units<T: Copy>(data: &mut [T], unit: usize) {
    let octet = OCTET * unit;
    for group in data.chunks_exact_mut(GROUP * unit) {
        let (second, rest) = group[octet..].split_at_mut(octet);
        second.swap_with_slice(&mut rest[..octet]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn full_group_order() {
        let entries: Vec<u32> = (0..32).collect();
        let reordered = csm1_reorder(&entries);
        let expected: Vec<u32> = (0..8).chain(16..24).chain(8..16).chain(24..32).collect();
        assert_eq!(reordered, expected);
    }

    #[test]
    fn involution_for_common_tables() {
        for &count in &[16usize, 256] {
            for &width in &[2usize, 4] {
                let table: Vec<u8> = (0..count * width).map(|i| (i * 7 % 256) as u8).collect();
                let once = swap_palette_csm1(&table, width).unwrap();
                let twice = swap_palette_csm1(&once, width).unwrap();
                assert_eq!(twice, table, "{count} entries x {width} bytes");
                if count == 256 {
                    assert_ne!(once, table);
                }
            }
        }
    }

    #[test]
    fn sixteen_entries_pass_through() {
        let table: Vec<u16> = (100..116).collect();
        assert_eq!(csm1_reorder(&table), table);
    }

    #[test]
    fn partial_tail_is_untouched() {
        let mut table: Vec<u16> = (0..45).collect();
        csm1_reorder_inplace(&mut table);
        assert_eq!(table[8], 16);
        assert_eq!(table[16], 8);
        assert_eq!(&table[32..], &(32..45).collect::<Vec<u16>>()[..]);
    }

    #[test]
    fn byte_level_matches_typed() {
        let words: Vec<u32> = (0..64u32).map(|i| i.wrapping_mul(0x0101_0101)).collect();
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let typed: Vec<u8> = csm1_reorder(&words)
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        assert_eq!(swap_palette_csm1(&bytes, 4).unwrap(), typed);
    }

    #[test]
    fn rejects_bad_entry_width() {
        assert_eq!(
            swap_palette_csm1(&[0; 24], 3),
            Err(SizeError::UnsupportedEntryWidth(3))
        );
        assert_eq!(
            swap_palette_csm1_inplace(&mut [0; 7], 2),
            Err(SizeError::NotPixelAligned)
        );
        assert_eq!(swap_palette_csm1(&[], 4), Ok(vec![]));
    }
}
