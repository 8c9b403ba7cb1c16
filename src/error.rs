/// Buffer or dimension validation failure.
///
/// Returned only by the validating entry points. The raw transforms never
/// fail; they clamp out-of-range accesses and report them through
/// [`Transformed::skipped`](crate::Transformed::skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SizeError {
    /// Buffer length is zero or not a whole number of pixels/entries.
    #[error("buffer length is not a whole number of pixels or entries")]
    NotPixelAligned,
    /// Destination is too small for the converted source.
    #[error("destination buffer is too small for the source")]
    PixelCountMismatch,
    /// Width or height is zero.
    #[error("width and height must be non-zero")]
    ZeroDimension,
    /// `width * height * bpp` does not fit in `usize`.
    #[error("image dimensions overflow the address space")]
    DimensionOverflow,
    /// Buffer length disagrees with what the dimensions imply.
    #[error("buffer holds {actual} bytes but the dimensions need {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// Bit depth other than 4, 8, 16 or 32.
    #[error("unsupported bit depth {0}")]
    UnsupportedDepth(u32),
    /// Dimensions passed validation but the layout could not place every
    /// pixel; `skipped` copies were dropped.
    #[error("{skipped} copies fell outside the buffers")]
    Clamped { skipped: usize },
    /// Palette entry width other than 2 or 4 bytes.
    #[error("unsupported palette entry width {0}")]
    UnsupportedEntryWidth(usize),
}
