//! Low-level building blocks for custom morphology pipelines.
//!
//! These expose the reduction engine and marker parsing directly. Most users
//! should prefer the top-level operators or [`crate::Morpher`].

pub use crate::element::marker::{scan_rgb, MarkerScan, ANCHOR_RGB, EXCLUDED_RGB};
pub use crate::kernel::scalar::{reduce, reduce_with};
pub use crate::kernel::{Max, Min, Reducer};
pub use crate::ops::subtract_saturating;

#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::{reduce_par, reduce_with_par};
