//! Rayon-parallel engine (feature-gated).
//!
//! Output rows are disjoint chunks of one buffer, so each worker writes only
//! its own rows while every worker reads the shared, unchanging input.
//! Results are bit-identical to the scalar engine.

use crate::element::StructuringElement;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{reduce_row, Reducer};
use crate::trace::{trace_event, trace_span};
use rayon::prelude::*;

/// Row-parallel counterpart of [`crate::kernel::scalar::reduce`].
pub fn reduce_par<R: Reducer>(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    reduce_with_par(image, se, R::SEED, R::combine)
}

/// Row-parallel counterpart of [`crate::kernel::scalar::reduce_with`].
pub fn reduce_with_par<F>(
    image: ImageView<'_, u8>,
    se: &StructuringElement,
    seed: u8,
    combine: F,
) -> OwnedImage
where
    F: Fn(u8, u8) -> u8 + Sync,
{
    let (width, height) = image.dims();
    let _span = trace_span!(
        "reduce",
        width = width,
        height = height,
        se_width = se.width(),
        se_height = se.height(),
        parallel = true
    )
    .entered();

    let offsets = se.offsets();
    let mut out = vec![seed; width * height];
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| reduce_row(image, &offsets, y, seed, &combine, row));

    trace_event!("reduce_done", samples = offsets.len());
    OwnedImage::from_raw_parts(out, width, height)
}
