//! Single-channel 8-bit images.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. `OwnedImage` is the
//! contiguous buffer every operator returns.
//!
//! Both types hold exactly one sample per pixel. Colour data must be
//! converted to intensity before it reaches this module (see `image::io`
//! for the `image`-crate bridge); a contiguous buffer longer than
//! `width * height` is rejected with `ChannelMismatch` rather than being
//! read as gray.

use crate::util::{MorphError, MorphResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view; `data` must hold exactly `width * height`
    /// samples.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> MorphResult<Self> {
        let expected = checked_area(width, height)?;
        if data.len() > expected {
            return Err(MorphError::ChannelMismatch {
                expected,
                got: data.len(),
            });
        }
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> MorphResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(MorphError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> MorphResult<Self> {
        let expected = checked_area(width, height)?;
        if data.len() < expected {
            return Err(MorphError::BufferTooSmall {
                needed: expected,
                got: data.len(),
            });
        }
        if data.len() > expected {
            return Err(MorphError::ChannelMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> MorphResult<Self> {
        let len = checked_area(width, height)?;
        Self::new(vec![value; len], width, height)
    }

    /// Creates an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> MorphResult<Self>
    where
        F: FnMut(usize, usize) -> u8,
    {
        let len = checked_area(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(data, width, height)
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, u8>) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            let row = view.row(y).expect("rows validated by the view");
            data.extend_from_slice(row);
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its sample buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Output buffer for the engine; never aliases an input.
    pub(crate) fn from_raw_parts(data: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }
}

fn checked_area(width: usize, height: usize) -> MorphResult<usize> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(MorphError::InvalidDimensions { width, height })
}

fn required_len(width: usize, height: usize, stride: usize) -> MorphResult<usize> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(MorphError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(MorphError::InvalidDimensions { width, height })?;
    Ok(needed)
}
