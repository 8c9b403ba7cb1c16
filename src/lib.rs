//! # gs-swizzle
//!
//! Convert PlayStation 2 GS texture and palette data between the GS
//! local-memory ("swizzled") arrangement and plain row-major order.
//!
//! ## Core operations (always available)
//!
//! - [`swizzle`] / [`unswizzle`] move a whole image between layouts for
//!   PSMT4, PSMT8, PSMCT16 and PSMCT32, chosen by [`PixelFormat`]. They never
//!   fail: addresses that fall outside a short or corrupt buffer are skipped
//!   and the output keeps its full length. [`transform`] and the `_report`
//!   variants also return how many copies were skipped; the `_checked`
//!   variants reject mismatched dimensions up front and treat any skipped
//!   copy as [`SizeError::Clamped`].
//! - [`swap_palette_csm1`] and [`csm1_reorder`] convert CLUTs between linear
//!   and CSM1 order. The reorder is its own inverse.
//! - [`unpack_nibbles`], [`pack_nibbles`] and [`swap_nibbles`] are the
//!   SIMD-dispatched 4bpp helpers used internally.
//!
//! 4bpp textures come in two arrangements; the caller picks one with
//! [`Psmt4Strategy`].
//!
//! ```
//! use gs_swizzle::{PixelFormat, Psmt4Strategy, swizzle, unswizzle};
//!
//! let format = PixelFormat::from_bits(4, Psmt4Strategy::PageBlock).unwrap();
//! let linear = vec![0x5Au8; 128 * 128 / 2];
//! let tiled = swizzle(format, &linear, 128, 128);
//! assert_eq!(unswizzle(format, &tiled, 128, 128), linear);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`**: typed PSMCT32 textures and 32-bit palettes using
//!   [`rgb::Rgba`] via bytemuck.
//! - **`imgref`**: whole-image conversions to and from [`imgref`] types
//!   (`ImgRef`, `ImgVec`). Implies `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod error;
mod format;
mod linear;
mod nibble;
mod palette;
mod psmt4;
mod swizzle;

pub use error::SizeError;
pub use format::{Direction, PixelFormat, PixelFormatTransform, Psmt4Strategy, Transformed};
pub use linear::{Psmct16, Psmct32, Psmt8, psmct16_address, psmt8_address};
pub use nibble::{pack_nibbles, swap_nibbles, swap_nibbles_inplace, unpack_nibbles};
pub use palette::{csm1_reorder, csm1_reorder_inplace, swap_palette_csm1, swap_palette_csm1_inplace};
pub use psmt4::{PageBlock, Unpacked8};
pub use swizzle::*;

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod imgref;
