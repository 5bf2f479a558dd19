//! High-level morphology API.
//!
//! A [`Morpher`] owns one structuring element and applies any [`Operation`]
//! to any number of images. [`MorphConfig`] selects the parallel engine and
//! optional anchor validation.

use crate::element::StructuringElement;
use crate::image::{ImageView, OwnedImage};
use crate::ops::{self, Backend};
use crate::trace::{trace_event, trace_span};
use crate::util::{MorphError, MorphResult};

/// Morphology operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Erode,
    Dilate,
    Open,
    Close,
    WhiteTopHat,
    BlackTopHat,
    Gradient,
}

impl Operation {
    /// The six classic outputs: erosion, dilation, opening, closing and both
    /// top-hats.
    pub const ALL_CLASSIC: [Operation; 6] = [
        Operation::Erode,
        Operation::Dilate,
        Operation::Open,
        Operation::Close,
        Operation::WhiteTopHat,
        Operation::BlackTopHat,
    ];

    /// File stem used when persisting this operation's output.
    pub fn file_stem(self) -> &'static str {
        match self {
            Operation::Erode => "eroded",
            Operation::Dilate => "dilated",
            Operation::Open => "opened",
            Operation::Close => "closed",
            Operation::WhiteTopHat => "white_top_hat",
            Operation::BlackTopHat => "black_top_hat",
            Operation::Gradient => "gradient",
        }
    }
}

/// Configuration for [`Morpher`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MorphConfig {
    /// Use the row-parallel engine. Ignored unless the `rayon` feature is
    /// enabled.
    pub parallel: bool,
    /// Reject elements whose anchor cell is excluded from the mask.
    pub strict_anchor: bool,
}

/// Applies morphology operations with a fixed structuring element.
#[derive(Clone, Debug)]
pub struct Morpher {
    element: StructuringElement,
    cfg: MorphConfig,
}

impl Morpher {
    /// Creates a morpher with the default configuration.
    pub fn new(element: StructuringElement) -> Self {
        Self {
            element,
            cfg: MorphConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MorphConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the structuring element.
    pub fn element(&self) -> &StructuringElement {
        &self.element
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MorphConfig {
        &self.cfg
    }

    /// Applies `op` to `image`.
    pub fn apply(&self, op: Operation, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.check_anchor()?;
        let backend = self.backend();
        let _span = trace_span!("morph", op = op.file_stem()).entered();
        let se = &self.element;
        let out = match op {
            Operation::Erode => ops::erode_with(backend, image, se),
            Operation::Dilate => ops::dilate_with(backend, image, se),
            Operation::Open => ops::open_with(backend, image, se),
            Operation::Close => ops::close_with(backend, image, se),
            Operation::WhiteTopHat => ops::white_top_hat_with(backend, image, se),
            Operation::BlackTopHat => ops::black_top_hat_with(backend, image, se),
            Operation::Gradient => ops::gradient_with(backend, image, se),
        };
        trace_event!("morph_done", width = out.width(), height = out.height());
        Ok(out)
    }

    /// Applies every operation in `ops` to the same input, in order.
    pub fn apply_all(
        &self,
        ops: &[Operation],
        image: ImageView<'_, u8>,
    ) -> MorphResult<Vec<(Operation, OwnedImage)>> {
        ops.iter()
            .map(|&op| self.apply(op, image).map(|out| (op, out)))
            .collect()
    }

    /// Erosion.
    pub fn erode(&self, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.apply(Operation::Erode, image)
    }

    /// Dilation.
    pub fn dilate(&self, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.apply(Operation::Dilate, image)
    }

    /// Opening.
    pub fn open(&self, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.apply(Operation::Open, image)
    }

    /// Closing.
    pub fn close(&self, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.apply(Operation::Close, image)
    }

    /// White top-hat.
    pub fn white_top_hat(&self, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.apply(Operation::WhiteTopHat, image)
    }

    /// Black top-hat.
    pub fn black_top_hat(&self, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.apply(Operation::BlackTopHat, image)
    }

    /// Morphological gradient.
    pub fn gradient(&self, image: ImageView<'_, u8>) -> MorphResult<OwnedImage> {
        self.apply(Operation::Gradient, image)
    }

    fn check_anchor(&self) -> MorphResult<()> {
        if self.cfg.strict_anchor && !self.element.anchor_included() {
            let (x, y) = self.element.anchor();
            return Err(MorphError::AnchorExcluded { x, y });
        }
        Ok(())
    }

    #[cfg(feature = "rayon")]
    fn backend(&self) -> Backend {
        if self.cfg.parallel {
            Backend::Rayon
        } else {
            Backend::Scalar
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn backend(&self) -> Backend {
        Backend::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::{MorphConfig, Morpher, Operation};
    use crate::element::{Mask, StructuringElement};
    use crate::ops::subtract_saturating;
    use crate::util::MorphError;
    use crate::OwnedImage;

    #[test]
    fn strict_anchor_rejects_excluded_anchor() {
        let mut mask = Mask::new(3, 3, true).unwrap();
        mask.set(1, 1, false).unwrap();
        let se = StructuringElement::new(mask, (1, 1)).unwrap();
        let image = OwnedImage::filled(4, 4, 9).unwrap();

        let lenient = Morpher::new(se.clone());
        assert!(lenient.open(image.view()).is_ok());

        let strict = Morpher::new(se).with_config(MorphConfig {
            strict_anchor: true,
            ..MorphConfig::default()
        });
        let err = strict.erode(image.view()).err().unwrap();
        assert_eq!(err, MorphError::AnchorExcluded { x: 1, y: 1 });
    }

    #[test]
    fn apply_all_keeps_order_and_size() {
        let image = OwnedImage::from_fn(5, 3, |x, y| (x * 50 + y) as u8).unwrap();
        let morpher = Morpher::new(StructuringElement::cross(3).unwrap());
        let outputs = morpher
            .apply_all(&Operation::ALL_CLASSIC, image.view())
            .unwrap();
        assert_eq!(outputs.len(), 6);
        for ((op, out), expected) in outputs.iter().zip(Operation::ALL_CLASSIC) {
            assert_eq!(*op, expected);
            assert_eq!(out.dims(), image.dims());
        }
        assert_eq!(outputs[4].0.file_stem(), "white_top_hat");
    }

    #[test]
    fn gradient_matches_dilate_minus_erode() {
        let image = OwnedImage::from_fn(6, 4, |x, y| (x * 40 + y) as u8).unwrap();
        let morpher = Morpher::new(StructuringElement::square(3).unwrap());

        let grad = morpher.gradient(image.view()).unwrap();
        let dilated = morpher.dilate(image.view()).unwrap();
        let eroded = morpher.erode(image.view()).unwrap();
        let expected = subtract_saturating(dilated.view(), eroded.view()).unwrap();
        assert_eq!(grad, expected);
        let applied = morpher.apply(Operation::Gradient, image.view());
        assert_eq!(applied.unwrap(), grad);
    }
}
