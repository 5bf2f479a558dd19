//! graymorph is a CPU grayscale morphology library built on one generic
//! neighborhood reduction engine.
//!
//! Erosion and dilation are the engine specialized with a `Min`/`Max` fold;
//! opening, closing, the top-hats and the gradient sequence those passes.
//! Samples outside the image are skipped rather than padded. Optional
//! features add row parallelism (`rayon`), `image`-crate I/O (`image-io`)
//! and spans/events (`tracing`).

pub mod element;
pub mod image;
pub mod kernel;
pub mod lowlevel;
mod morpher;
pub mod ops;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::element::{Mask, StructuringElement};
pub use crate::image::{ImageView, OwnedImage};
pub use crate::morpher::{MorphConfig, Morpher, Operation};
pub use crate::ops::{black_top_hat, close, dilate, erode, gradient, open, white_top_hat};
pub use crate::util::{MorphError, MorphResult};
