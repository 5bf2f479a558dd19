//! Error types for graymorph.

use thiserror::Error;

/// Result alias for graymorph operations.
pub type MorphResult<T> = std::result::Result<T, MorphError>;

/// Errors that can occur when building elements or running morphology.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MorphError {
    /// Image dimensions are zero or overflow the address space.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Buffer length does not describe single-channel 8-bit data.
    #[error("expected {expected} single-channel samples, got {got}")]
    ChannelMismatch { expected: usize, got: usize },
    /// Kernel marker image or mask has a zero extent.
    #[error("malformed kernel: size {width}x{height}")]
    MalformedKernel { width: usize, height: usize },
    /// Interleaved RGB marker buffer has the wrong length.
    #[error("rgb marker buffer mismatch: needed {needed} bytes, got {got}")]
    RgbBufferMismatch { needed: usize, got: usize },
    /// Anchor does not lie inside the mask.
    #[error("anchor ({x}, {y}) outside {width}x{height} mask")]
    AnchorOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Anchor cell is excluded from the mask (strict anchor mode only).
    #[error("anchor cell ({x}, {y}) is excluded from the mask")]
    AnchorExcluded { x: usize, y: usize },
    /// Mask write outside the grid.
    #[error("mask index ({x}, {y}) outside {width}x{height} grid")]
    MaskIndexOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Per-pixel combination of images with different sizes.
    #[error("shape mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    ShapeMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
    /// Image could not be read, decoded, or written.
    #[error("resource unavailable: {reason}")]
    ResourceUnavailable { reason: String },
}
