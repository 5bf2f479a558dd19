//! Morphology operators built on the reduction engine.
//!
//! Elementary operators are single engine passes:
//! - erosion: `Min` fold seeded with 255,
//! - dilation: `Max` fold seeded with 0.
//!
//! Composite operators sequence full passes and, for the top-hats and the
//! gradient, take a per-pixel difference. Differences saturate to `[0, 255]`:
//! a negative result is written as 0 and nothing can exceed 255.
//!
//! Every operator reads only the image passed to it and returns a new image
//! of the same size.

use crate::element::StructuringElement;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{scalar, Reducer};

mod composite;
mod elementary;

pub use composite::{black_top_hat, close, gradient, open, subtract_saturating, white_top_hat};
pub use elementary::{dilate, erode};

pub(crate) use composite::{
    black_top_hat_with, close_with, gradient_with, open_with, white_top_hat_with,
};
pub(crate) use elementary::{dilate_with, erode_with};

/// Engine used for each pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Backend {
    #[default]
    Scalar,
    #[cfg(feature = "rayon")]
    Rayon,
}

impl Backend {
    fn reduce<R: Reducer>(self, image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
        match self {
            Backend::Scalar => scalar::reduce::<R>(image, se),
            #[cfg(feature = "rayon")]
            Backend::Rayon => crate::kernel::rayon::reduce_par::<R>(image, se),
        }
    }
}
