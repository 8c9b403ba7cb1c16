use archmage::prelude::*;

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn unpack_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (&b, d) in src.iter().zip(dst.chunks_exact_mut(2)) {
        d[0] = b & 0x0F;
        d[1] = b >> 4;
    }
}

pub(super) fn pack_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (pair, d) in src.chunks(2).zip(dst.iter_mut()) {
        let hi = pair.get(1).map_or(0, |&b| b & 0x0F);
        *d = (pair[0] & 0x0F) | (hi << 4);
    }
}

pub(super) fn swap_row_scalar(_token: ScalarToken, row: &mut [u8]) {
    for b in row {
        *b = b.rotate_left(4);
    }
}

pub(super) fn copy_swap_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (&s, d) in src.iter().zip(dst.iter_mut()) {
        *d = s.rotate_left(4);
    }
}

// ===========================================================================
// Scalar wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn unpack_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    unpack_row_scalar(t, s, d);
}
pub(super) fn pack_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    pack_row_scalar(t, s, d);
}
pub(super) fn swap_impl_scalar(t: ScalarToken, b: &mut [u8]) {
    swap_row_scalar(t, b);
}
pub(super) fn copy_swap_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    copy_swap_row_scalar(t, s, d);
}
