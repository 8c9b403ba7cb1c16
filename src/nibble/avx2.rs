use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm_storeu_si128};

// ===========================================================================
// x86-64 v3 rite row implementations
//
// Nibble moves never cross a 16-bit lane, so 128-bit ops are enough; the
// v3 tier only guarantees they run without a feature check per call.
// ===========================================================================

#[rite]
pub(super) fn unpack_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let low = _mm_set1_epi8(0x0F);
    let n = src.len().min(dst.len() / 2);
    let mut i = 0;
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = _mm_loadu_si128(s);
        let lo = _mm_and_si128(v, low);
        let hi = _mm_and_si128(_mm_srli_epi16::<4>(v), low);
        let d0: &mut [u8; 16] = (&mut dst[2 * i..2 * i + 16]).try_into().unwrap();
        _mm_storeu_si128(d0, _mm_unpacklo_epi8(lo, hi));
        let d1: &mut [u8; 16] = (&mut dst[2 * i + 16..2 * i + 32]).try_into().unwrap();
        _mm_storeu_si128(d1, _mm_unpackhi_epi8(lo, hi));
        i += 16;
    }
    for (&b, d) in src[i..].iter().zip(dst[2 * i..].chunks_exact_mut(2)) {
        d[0] = b & 0x0F;
        d[1] = b >> 4;
    }
}

#[rite]
pub(super) fn pack_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let low = _mm_set1_epi8(0x0F);
    let byte = _mm_set1_epi16(0x00FF);
    let n = dst.len().min(src.len() / 2);
    let mut i = 0;
    while i + 16 <= n {
        let a: &[u8; 16] = src[2 * i..2 * i + 16].try_into().unwrap();
        let b: &[u8; 16] = src[2 * i + 16..2 * i + 32].try_into().unwrap();
        // lane = lo | hi << 8  →  lo | hi << 4
        let ma = _mm_and_si128(_mm_loadu_si128(a), low);
        let pa = _mm_and_si128(_mm_or_si128(ma, _mm_srli_epi16::<4>(ma)), byte);
        let mb = _mm_and_si128(_mm_loadu_si128(b), low);
        let pb = _mm_and_si128(_mm_or_si128(mb, _mm_srli_epi16::<4>(mb)), byte);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        _mm_storeu_si128(d, _mm_packus_epi16(pa, pb));
        i += 16;
    }
    for (pair, d) in src[2 * i..].chunks(2).zip(dst[i..].iter_mut()) {
        let hi = pair.get(1).map_or(0, |&b| b & 0x0F);
        *d = (pair[0] & 0x0F) | (hi << 4);
    }
}

#[rite]
pub(super) fn swap_row_v3(_token: X64V3Token, row: &mut [u8]) {
    let low = _mm_set1_epi8(0x0F);
    let n = row.len();
    let mut i = 0;
    while i + 16 <= n {
        let arr: &[u8; 16] = row[i..i + 16].try_into().unwrap();
        let v = _mm_loadu_si128(arr);
        let lo = _mm_and_si128(v, low);
        let hi = _mm_and_si128(_mm_srli_epi16::<4>(v), low);
        let swapped = _mm_or_si128(_mm_slli_epi16::<4>(lo), hi);
        let out: &mut [u8; 16] = (&mut row[i..i + 16]).try_into().unwrap();
        _mm_storeu_si128(out, swapped);
        i += 16;
    }
    for b in &mut row[i..] {
        *b = b.rotate_left(4);
    }
}

#[rite]
pub(super) fn copy_swap_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let low = _mm_set1_epi8(0x0F);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let v = _mm_loadu_si128(s);
        let lo = _mm_and_si128(v, low);
        let hi = _mm_and_si128(_mm_srli_epi16::<4>(v), low);
        let swapped = _mm_or_si128(_mm_slli_epi16::<4>(lo), hi);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        _mm_storeu_si128(d, swapped);
        i += 16;
    }
    for (&s, d) in src[i..n].iter().zip(dst[i..n].iter_mut()) {
        *d = s.rotate_left(4);
    }
}

// ===========================================================================
// x86-64 arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn unpack_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    unpack_row_v3(t, s, d);
}
#[arcane]
pub(super) fn pack_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    pack_row_v3(t, s, d);
}
#[arcane]
pub(super) fn swap_impl_v3(t: X64V3Token, b: &mut [u8]) {
    swap_row_v3(t, b);
}
#[arcane]
pub(super) fn copy_swap_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    copy_swap_row_v3(t, s, d);
}
