//! Flat structuring elements.
//!
//! A [`StructuringElement`] is a binary [`Mask`] plus an anchor cell. The
//! anchor is the mask cell aligned with the output pixel while the engine
//! slides the window, so the sample read for mask cell `(dx, dy)` at output
//! `(x, y)` is `(x + dx - ax, y + dy - ay)`.
//!
//! Elements are immutable once built and may be shared across any number of
//! operations and threads.

use crate::util::{MorphError, MorphResult};

pub mod marker;

/// Bounds-checked rectangular grid of "included" flags, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Mask {
    /// Creates a `width x height` mask with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: bool) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::MalformedKernel { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(MorphError::MalformedKernel { width, height })?;
        Ok(Self {
            cells: vec![fill; len],
            width,
            height,
        })
    }

    /// Mask width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the flag at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Sets the flag at `(x, y)`. The grid never grows.
    pub fn set(&mut self, x: usize, y: usize, included: bool) -> MorphResult<()> {
        if x >= self.width || y >= self.height {
            return Err(MorphError::MaskIndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.cells[y * self.width + x] = included;
        Ok(())
    }

    /// Number of included cells.
    pub fn count_included(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Binary mask with an anchor point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    mask: Mask,
    anchor: (usize, usize),
}

impl StructuringElement {
    /// Builds an element, checking that `anchor` lies inside `mask`.
    pub fn new(mask: Mask, anchor: (usize, usize)) -> MorphResult<Self> {
        let (x, y) = anchor;
        if x >= mask.width() || y >= mask.height() {
            return Err(MorphError::AnchorOutOfBounds {
                x,
                y,
                width: mask.width(),
                height: mask.height(),
            });
        }
        Ok(Self { mask, anchor })
    }

    /// 1x1 element with its single cell included; erosion and dilation with
    /// it return the input unchanged.
    pub fn identity() -> Self {
        Self {
            mask: Mask {
                cells: vec![true],
                width: 1,
                height: 1,
            },
            anchor: (0, 0),
        }
    }

    /// Fully included `width x height` rectangle anchored at
    /// `(width / 2, height / 2)`.
    pub fn rect(width: usize, height: usize) -> MorphResult<Self> {
        let mask = Mask::new(width, height, true)?;
        Self::new(mask, (width / 2, height / 2))
    }

    /// Fully included `size x size` square anchored at its centre.
    pub fn square(size: usize) -> MorphResult<Self> {
        Self::rect(size, size)
    }

    /// `size x size` plus sign: the centre row and centre column.
    pub fn cross(size: usize) -> MorphResult<Self> {
        let mut mask = Mask::new(size, size, false)?;
        let c = size / 2;
        for i in 0..size {
            mask.set(i, c, true)?;
            mask.set(c, i, true)?;
        }
        Self::new(mask, (c, c))
    }

    /// Discrete disk of the given radius in a `(2r + 1)` square, anchored at
    /// the centre. Radius 0 is the identity element.
    pub fn disk(radius: usize) -> MorphResult<Self> {
        let invalid = MorphError::MalformedKernel {
            width: radius,
            height: radius,
        };
        let size = radius
            .checked_mul(2)
            .and_then(|v| v.checked_add(1))
            .ok_or(invalid)?;
        let mut mask = Mask::new(size, size, false)?;
        let r = radius as i64;
        for y in 0..size {
            for x in 0..size {
                let dx = x as i64 - r;
                let dy = y as i64 - r;
                if dx * dx + dy * dy <= r * r {
                    mask.set(x, y, true)?;
                }
            }
        }
        Self::new(mask, (radius, radius))
    }

    /// Parses a marker image given as interleaved RGB bytes.
    ///
    /// Pure red `(255, 0, 0)` marks the anchor, pure black `(0, 0, 0)` marks
    /// an excluded cell, and every other colour (the red cell included) is
    /// part of the mask. See [`marker::scan_rgb`] for the scan order and the
    /// fallback when no anchor pixel is present.
    pub fn from_rgb(data: &[u8], width: usize, height: usize) -> MorphResult<Self> {
        marker::scan_rgb(data, width, height).map(|scan| scan.element)
    }

    /// The mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Anchor coordinate `(ax, ay)`.
    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    /// Mask width.
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    /// Mask height.
    pub fn height(&self) -> usize {
        self.mask.height()
    }

    /// `(width, height)` of the mask.
    pub fn size(&self) -> (usize, usize) {
        (self.mask.width(), self.mask.height())
    }

    /// Whether the anchor cell itself takes part in the fold.
    ///
    /// When it does, erosion never brightens and dilation never darkens a
    /// pixel.
    pub fn anchor_included(&self) -> bool {
        let (x, y) = self.anchor;
        self.mask.get(x, y).unwrap_or(false)
    }

    /// Point reflection about the anchor.
    pub fn reflect(&self) -> Self {
        let (w, h) = self.size();
        let mut cells = vec![false; w * h];
        for y in 0..h {
            for x in 0..w {
                cells[(h - 1 - y) * w + (w - 1 - x)] = self.mask.cells[y * w + x];
            }
        }
        Self {
            mask: Mask {
                cells,
                width: w,
                height: h,
            },
            anchor: (w - 1 - self.anchor.0, h - 1 - self.anchor.1),
        }
    }

    /// Signed source offsets `(dx - ax, dy - ay)` of every included cell.
    pub(crate) fn offsets(&self) -> Vec<(isize, isize)> {
        let (ax, ay) = (self.anchor.0 as isize, self.anchor.1 as isize);
        let mut out = Vec::with_capacity(self.mask.count_included());
        for dy in 0..self.height() {
            for dx in 0..self.width() {
                if self.mask.cells[dy * self.width() + dx] {
                    out.push((dx as isize - ax, dy as isize - ay));
                }
            }
        }
        out
    }
}
