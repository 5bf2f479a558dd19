//! Sequential reference engine.

use crate::element::StructuringElement;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{reduce_row, Reducer};
use crate::trace::{trace_event, trace_span};

/// Reduces `image` under `se` with the strategy `R`.
///
/// Cost is `O(width * height * included_cells)`. The input is only read; the
/// result is a fresh image of the same size.
pub fn reduce<R: Reducer>(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    reduce_with(image, se, R::SEED, R::combine)
}

/// Reduces `image` under `se` with an explicit seed and combine function.
///
/// `combine(acc, sample)` must be associative and commutative; samples are
/// not visited in raster order.
pub fn reduce_with<F>(
    image: ImageView<'_, u8>,
    se: &StructuringElement,
    seed: u8,
    combine: F,
) -> OwnedImage
where
    F: Fn(u8, u8) -> u8,
{
    let (width, height) = image.dims();
    let _span = trace_span!(
        "reduce",
        width = width,
        height = height,
        se_width = se.width(),
        se_height = se.height(),
        parallel = false
    )
    .entered();

    let offsets = se.offsets();
    let mut out = vec![seed; width * height];
    for (y, row) in out.chunks_exact_mut(width).enumerate() {
        reduce_row(image, &offsets, y, seed, &combine, row);
    }

    trace_event!("reduce_done", samples = offsets.len());
    OwnedImage::from_raw_parts(out, width, height)
}
