extern crate alloc;
extern crate std;
use super::*;
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

fn make_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i * 37 % 251) as u8).collect()
}

// --- Reference implementations ---

fn ref_unpack(src: &[u8]) -> Vec<u8> {
    src.iter().flat_map(|&b| [b & 0x0F, b >> 4]).collect()
}

fn ref_pack(src: &[u8]) -> Vec<u8> {
    src.chunks(2)
        .map(|p| (p[0] & 0x0F) | (p.get(1).copied().unwrap_or(0) & 0x0F) << 4)
        .collect()
}

fn ref_swap(src: &[u8]) -> Vec<u8> {
    src.iter().map(|&b| (b << 4) | (b >> 4)).collect()
}

// Covers the remainder-only path, exact SIMD chunks and chunk + remainder.
const TEST_LENGTHS: &[usize] = &[0, 1, 2, 7, 15, 16, 17, 31, 32, 33, 63, 64, 65, 100, 257];

#[test]
fn permutation_unpack() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENGTHS {
            let src = make_bytes(n);
            let mut dst = vec![0xAAu8; n * 2];
            unpack_nibbles(&src, &mut dst).unwrap();
            assert_eq!(dst, ref_unpack(&src), "unpack n={n} tier={perm}");
        }
    });
    std::eprintln!("unpack: {report}");
}

#[test]
fn permutation_pack() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENGTHS {
            let src = make_bytes(n);
            let mut dst = vec![0xAAu8; n.div_ceil(2)];
            pack_nibbles(&src, &mut dst).unwrap();
            assert_eq!(dst, ref_pack(&src), "pack n={n} tier={perm}");
        }
    });
    std::eprintln!("pack: {report}");
}

#[test]
fn permutation_swap_inplace() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENGTHS {
            let mut data = make_bytes(n);
            let expected = ref_swap(&data);
            swap_nibbles_inplace(&mut data);
            assert_eq!(data, expected, "swap_inplace n={n} tier={perm}");
        }
    });
    std::eprintln!("swap_inplace: {report}");
}

#[test]
fn permutation_copy_swap() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENGTHS {
            let src = make_bytes(n);
            let mut dst = vec![0u8; n];
            swap_nibbles(&src, &mut dst).unwrap();
            assert_eq!(dst, ref_swap(&src), "copy_swap n={n} tier={perm}");
        }
    });
    std::eprintln!("copy_swap: {report}");
}

#[test]
fn unpack_then_pack_is_identity() {
    let src = make_bytes(300);
    let mut wide = vec![0u8; 600];
    unpack_nibbles(&src, &mut wide).unwrap();
    let mut back = vec![0u8; 300];
    pack_nibbles(&wide, &mut back).unwrap();
    assert_eq!(back, src);
}

#[test]
fn unpack_leaves_extra_destination_alone() {
    let mut dst = [0xEEu8; 5];
    unpack_nibbles(&[0x21, 0x43], &mut dst).unwrap();
    assert_eq!(dst, [0x1, 0x2, 0x3, 0x4, 0xEE]);
}

#[test]
fn pack_masks_high_bits() {
    let mut dst = [0u8; 2];
    pack_nibbles(&[0xF1, 0x72, 0x13], &mut dst).unwrap();
    assert_eq!(dst, [0x21, 0x03]);
}

#[test]
fn size_errors() {
    assert_eq!(
        unpack_nibbles(&[0; 4], &mut [0; 7]),
        Err(SizeError::PixelCountMismatch)
    );
    assert_eq!(
        pack_nibbles(&[0; 5], &mut [0; 2]),
        Err(SizeError::PixelCountMismatch)
    );
    assert_eq!(
        swap_nibbles(&[0; 5], &mut [0; 4]),
        Err(SizeError::PixelCountMismatch)
    );
}
