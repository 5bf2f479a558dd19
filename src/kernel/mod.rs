//! Neighborhood reduction engine.
//!
//! Every morphology operator here is one fold: start each output pixel at a
//! seed, then combine it with every in-bounds sample under the structuring
//! element. Samples whose source coordinate falls outside the image are
//! skipped outright. No padding value is substituted, so border pixels fold
//! over fewer samples, and a pixel whose whole footprint is outside the image
//! keeps the seed.
//!
//! The combine function must be associative and commutative over `u8`; the
//! engine is free to visit samples in any order.

use crate::image::ImageView;

/// Fold strategy: a seed and an associative, commutative combine.
///
/// Implementors are zero-sized tags resolved at compile time, so the inner
/// loop is monomorphized per strategy.
pub trait Reducer {
    /// Value an output pixel starts from.
    const SEED: u8;

    /// Folds one sample into the accumulator.
    fn combine(acc: u8, sample: u8) -> u8;
}

/// Minimum fold seeded with 255 (erosion).
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

/// Maximum fold seeded with 0 (dilation).
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl Reducer for Min {
    const SEED: u8 = u8::MAX;

    #[inline]
    fn combine(acc: u8, sample: u8) -> u8 {
        acc.min(sample)
    }
}

impl Reducer for Max {
    const SEED: u8 = u8::MIN;

    #[inline]
    fn combine(acc: u8, sample: u8) -> u8 {
        acc.max(sample)
    }
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Folds output row `y` into `out`, which must be `image.width()` long.
///
/// Works offset by offset: for each included cell the valid `x` range is
/// clipped once, then the matching slice of the source row is folded in.
pub(crate) fn reduce_row<F>(
    image: ImageView<'_, u8>,
    offsets: &[(isize, isize)],
    y: usize,
    seed: u8,
    combine: &F,
    out: &mut [u8],
) where
    F: Fn(u8, u8) -> u8,
{
    let width = image.width() as isize;
    let height = image.height() as isize;
    debug_assert_eq!(out.len(), image.width());

    out.fill(seed);
    for &(ox, oy) in offsets {
        let sy = y as isize + oy;
        if sy < 0 || sy >= height {
            continue;
        }
        // Output x whose source x + ox lies in [0, width).
        let x0 = (-ox).max(0);
        let x1 = (width - ox).min(width);
        if x0 >= x1 {
            continue;
        }
        let src = image
            .row(sy as usize)
            .expect("source row within bounds after clipping");
        let (x0, x1) = (x0 as usize, x1 as usize);
        let sx0 = (x0 as isize + ox) as usize;
        let src = &src[sx0..sx0 + (x1 - x0)];
        for (acc, &sample) in out[x0..x1].iter_mut().zip(src) {
            *acc = combine(*acc, sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce_row, Max, Min, Reducer};
    use crate::ImageView;

    #[test]
    fn seeds_are_neutral_elements() {
        for v in [0u8, 1, 127, 254, 255] {
            assert_eq!(Min::combine(Min::SEED, v), v);
            assert_eq!(Max::combine(Max::SEED, v), v);
        }
    }

    #[test]
    fn row_fold_clips_offsets_at_both_edges() {
        let data = [5u8, 1, 7, 3];
        let image = ImageView::from_slice(&data, 4, 1).unwrap();
        let offsets = [(-1, 0), (0, 0), (1, 0)];
        let mut out = [0u8; 4];
        reduce_row(image, &offsets, 0, Min::SEED, &Min::combine, &mut out);
        assert_eq!(out, [1, 1, 1, 3]);
        reduce_row(image, &offsets, 0, Max::SEED, &Max::combine, &mut out);
        assert_eq!(out, [5, 7, 7, 7]);
    }

    #[test]
    fn row_fold_keeps_seed_when_footprint_is_outside() {
        let data = [9u8, 9, 9];
        let image = ImageView::from_slice(&data, 3, 1).unwrap();
        let mut out = [0u8; 3];
        reduce_row(image, &[(5, 0)], 0, Min::SEED, &Min::combine, &mut out);
        assert_eq!(out, [255, 255, 255]);
        reduce_row(image, &[(0, -1)], 0, Max::SEED, &Max::combine, &mut out);
        assert_eq!(out, [0, 0, 0]);
    }
}
