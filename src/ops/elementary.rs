use crate::element::StructuringElement;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{Max, Min};
use crate::ops::Backend;

/// Grayscale erosion: per-pixel minimum over the included neighbours.
///
/// Neighbours outside the image are skipped, so a pixel with no in-bounds
/// neighbour stays at 255.
pub fn erode(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    erode_with(Backend::Scalar, image, se)
}

/// Grayscale dilation: per-pixel maximum over the included neighbours.
///
/// A pixel with no in-bounds neighbour stays at 0.
pub fn dilate(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    dilate_with(Backend::Scalar, image, se)
}

pub(crate) fn erode_with(
    backend: Backend,
    image: ImageView<'_, u8>,
    se: &StructuringElement,
) -> OwnedImage {
    backend.reduce::<Min>(image, se)
}

pub(crate) fn dilate_with(
    backend: Backend,
    image: ImageView<'_, u8>,
    se: &StructuringElement,
) -> OwnedImage {
    backend.reduce::<Max>(image, se)
}

#[cfg(test)]
mod tests {
    use super::{dilate, erode};
    use crate::element::{Mask, StructuringElement};
    use crate::OwnedImage;

    #[test]
    fn identity_element_is_a_no_op() {
        let image = OwnedImage::from_fn(6, 4, |x, y| (x * 40 + y * 3) as u8).unwrap();
        let se = StructuringElement::identity();
        assert_eq!(erode(image.view(), &se), image);
        assert_eq!(dilate(image.view(), &se), image);
    }

    #[test]
    fn top_left_corner_folds_only_in_bounds_samples() {
        let image = OwnedImage::from_fn(5, 5, |x, y| (100 + x * 10 + y) as u8).unwrap();
        let se = StructuringElement::square(3).unwrap();
        assert_eq!(se.anchor(), (1, 1));

        // Only (0,0), (1,0), (0,1), (1,1) are in bounds at the corner.
        let in_bounds = [
            image.get(0, 0).unwrap(),
            image.get(1, 0).unwrap(),
            image.get(0, 1).unwrap(),
            image.get(1, 1).unwrap(),
        ];
        let eroded = erode(image.view(), &se);
        assert_eq!(eroded.get(0, 0), in_bounds.iter().copied().min());
        let dilated = dilate(image.view(), &se);
        assert_eq!(dilated.get(0, 0), in_bounds.iter().copied().max());
    }

    #[test]
    fn footprint_outside_image_keeps_seed() {
        // Only cell (4, 0) is included and the anchor is (0, 0), so every
        // output pixel reads four columns to the right.
        let mut mask = Mask::new(5, 1, false).unwrap();
        mask.set(4, 0, true).unwrap();
        let se = StructuringElement::new(mask, (0, 0)).unwrap();
        let image = OwnedImage::filled(6, 2, 77).unwrap();

        let eroded = erode(image.view(), &se);
        let dilated = dilate(image.view(), &se);
        assert_eq!(eroded.get(1, 0), Some(77));
        assert_eq!(eroded.get(2, 0), Some(255));
        assert_eq!(eroded.get(5, 1), Some(255));
        assert_eq!(dilated.get(2, 0), Some(0));
        assert_eq!(dilated.get(5, 1), Some(0));
    }
}
