//! End-to-end behaviour of the public transforms: dispatch by bit depth,
//! clamping on bad input, and the palette reorder.

use gs_swizzle::{
    Direction, PixelFormat, Psmt4Strategy, SizeError, csm1_reorder, psmct16_address,
    psmt8_address, swizzle, swizzle_report, transform, unswizzle, unswizzle_report,
};

fn noise(n: usize, mut seed: u64) -> Vec<u8> {
    (0..n)
        .map(|_| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (seed >> 33) as u8
        })
        .collect()
}

fn formats() -> Vec<PixelFormat> {
    [4, 8, 16, 32]
        .into_iter()
        .flat_map(|bits| {
            [Psmt4Strategy::Unpacked8, Psmt4Strategy::PageBlock]
                .map(|s| PixelFormat::from_bits(bits, s).unwrap())
        })
        .fold(Vec::new(), |mut v, f| {
            if !v.contains(&f) {
                v.push(f);
            }
            v
        })
}

#[test]
fn depth_dispatch() {
    assert_eq!(formats().len(), 5);
    assert_eq!(
        PixelFormat::from_bits(24, Psmt4Strategy::PageBlock),
        Err(SizeError::UnsupportedDepth(24))
    );
}

#[test_log::test]
fn aligned_sizes_round_trip() {
    for format in formats() {
        let (tw, th) = format.tile_granularity();
        for (w, h) in [(tw, th), (tw * 2, th), (tw, th * 2), (256, 256)] {
            let len = format.buffer_len(w, h).unwrap();
            let linear = noise(len, (w * 31 + h) as u64);
            let tiled = swizzle_report(format, &linear, w, h);
            assert!(tiled.is_complete(), "{format} {w}x{h}");
            let back = unswizzle_report(format, &tiled.data, w, h);
            assert!(back.is_complete(), "{format} {w}x{h}");
            assert_eq!(back.data, linear, "{format} {w}x{h}");
        }
    }
}

#[test_log::test]
fn one_byte_short_is_clamped_not_fatal() {
    for format in formats() {
        let len = format.buffer_len(128, 128).unwrap();
        let short = noise(len - 1, 99);
        for direction in [Direction::Swizzle, Direction::Unswizzle] {
            let out = transform(format, direction, &short, 128, 128);
            assert_eq!(out.data.len(), len, "{format} {direction}");
            assert!(out.skipped > 0, "{format} {direction}");
        }
    }
}

#[test_log::test]
fn empty_input_yields_zeroed_output() {
    let out = unswizzle_report(PixelFormat::Psmt8, &[], 32, 32);
    assert_eq!(out.data, vec![0u8; 1024]);
    assert_eq!(out.skipped, 1024);
}

#[test]
fn unaligned_sizes_keep_length() {
    for format in formats() {
        let len = format.buffer_len(40, 24).unwrap();
        let linear = noise(len, 5);
        assert_eq!(swizzle(format, &linear, 40, 24).len(), len, "{format}");
        assert_eq!(unswizzle(format, &linear, 40, 24).len(), len, "{format}");
    }
}

#[test]
fn psmct32_moves_whole_words() {
    let linear: Vec<u8> = (0..16 * 16).flat_map(|p: u32| p.to_le_bytes()).collect();
    let tiled = swizzle(PixelFormat::Psmct32, &linear, 16, 16);
    for y in 0..16 {
        for x in 0..16 {
            let at = psmt8_address(x, y, 16) * 4;
            let word = u32::from_le_bytes(tiled[at..at + 4].try_into().unwrap());
            assert_eq!(word as usize, y * 16 + x);
        }
    }
}

#[test]
fn psmct16_places_texels_by_address() {
    let (w, h) = (64, 64);
    let linear: Vec<u8> = (0..w * h).flat_map(|p| (p as u16).to_le_bytes()).collect();
    let tiled = swizzle(PixelFormat::Psmct16, &linear, w, h);
    for (x, y) in [(0, 0), (1, 0), (8, 0), (17, 5), (63, 63)] {
        let at = psmct16_address(x, y, w) * 2;
        let texel = u16::from_le_bytes([tiled[at], tiled[at + 1]]);
        assert_eq!(usize::from(texel), y * w + x);
    }
}

#[test]
fn palette_sub_groups_swap() {
    let clut: Vec<u16> = (0..256).collect();
    let reordered = csm1_reorder(&clut);
    for group in 0..8 {
        let base = group * 32;
        assert_eq!(reordered[base + 8], (base + 16) as u16);
        assert_eq!(reordered[base + 16], (base + 8) as u16);
        assert_eq!(reordered[base + 31], (base + 31) as u16);
    }
    assert_eq!(csm1_reorder(&reordered), clut);
}
