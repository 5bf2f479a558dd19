use crate::element::StructuringElement;
use crate::image::{ImageView, OwnedImage};
use crate::ops::{dilate_with, erode_with, Backend};
use crate::trace::trace_span;
use crate::util::{MorphError, MorphResult};

/// Opening: erosion followed by dilation. Removes bright detail smaller
/// than the element.
///
/// Both passes use `se` as given; dilation does not reflect it. So
/// `open(image) <= image` only holds for elements symmetric about an
/// included anchor. For any other element the anti-extensive opening is
/// `dilate(erode(image, se).view(), &se.reflect())`, see
/// [`StructuringElement::reflect`].
pub fn open(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    open_with(Backend::Scalar, image, se)
}

/// Closing: dilation followed by erosion. Fills dark detail smaller than
/// the element.
///
/// As with [`open`], `close(image) >= image` only holds for elements
/// symmetric about an included anchor. Otherwise pair the erosion with
/// [`StructuringElement::reflect`]ed dilation.
pub fn close(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    close_with(Backend::Scalar, image, se)
}

/// White top-hat: `image - open(image)`, saturating at 0.
pub fn white_top_hat(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    white_top_hat_with(Backend::Scalar, image, se)
}

/// Black top-hat: `close(image) - image`, saturating at 0.
pub fn black_top_hat(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    black_top_hat_with(Backend::Scalar, image, se)
}

/// Morphological gradient: `dilate(image) - erode(image)`, saturating at 0.
pub fn gradient(image: ImageView<'_, u8>, se: &StructuringElement) -> OwnedImage {
    gradient_with(Backend::Scalar, image, se)
}

/// Per-pixel `lhs - rhs` clamped to `[0, 255]`.
pub fn subtract_saturating(
    lhs: ImageView<'_, u8>,
    rhs: ImageView<'_, u8>,
) -> MorphResult<OwnedImage> {
    if lhs.dims() != rhs.dims() {
        return Err(MorphError::ShapeMismatch {
            left_width: lhs.width(),
            left_height: lhs.height(),
            right_width: rhs.width(),
            right_height: rhs.height(),
        });
    }
    Ok(diff_same_shape(lhs, rhs))
}

pub(crate) fn open_with(
    backend: Backend,
    image: ImageView<'_, u8>,
    se: &StructuringElement,
) -> OwnedImage {
    let _span = trace_span!("open").entered();
    let eroded = erode_with(backend, image, se);
    dilate_with(backend, eroded.view(), se)
}

pub(crate) fn close_with(
    backend: Backend,
    image: ImageView<'_, u8>,
    se: &StructuringElement,
) -> OwnedImage {
    let _span = trace_span!("close").entered();
    let dilated = dilate_with(backend, image, se);
    erode_with(backend, dilated.view(), se)
}

pub(crate) fn white_top_hat_with(
    backend: Backend,
    image: ImageView<'_, u8>,
    se: &StructuringElement,
) -> OwnedImage {
    let _span = trace_span!("white_top_hat").entered();
    let opened = open_with(backend, image, se);
    diff_same_shape(image, opened.view())
}

pub(crate) fn black_top_hat_with(
    backend: Backend,
    image: ImageView<'_, u8>,
    se: &StructuringElement,
) -> OwnedImage {
    let _span = trace_span!("black_top_hat").entered();
    let closed = close_with(backend, image, se);
    diff_same_shape(closed.view(), image)
}

pub(crate) fn gradient_with(
    backend: Backend,
    image: ImageView<'_, u8>,
    se: &StructuringElement,
) -> OwnedImage {
    let _span = trace_span!("gradient").entered();
    let dilated = dilate_with(backend, image, se);
    let eroded = erode_with(backend, image, se);
    diff_same_shape(dilated.view(), eroded.view())
}

fn diff_same_shape(lhs: ImageView<'_, u8>, rhs: ImageView<'_, u8>) -> OwnedImage {
    let (width, height) = lhs.dims();
    debug_assert_eq!((width, height), rhs.dims());
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let a = lhs.row(y).expect("row within bounds");
        let b = rhs.row(y).expect("row within bounds");
        out.extend(a.iter().zip(b).map(|(&a, &b)| a.saturating_sub(b)));
    }
    OwnedImage::from_raw_parts(out, width, height)
}

#[cfg(test)]
mod tests {
    use super::{black_top_hat, close, gradient, open, subtract_saturating, white_top_hat};
    use crate::element::{Mask, StructuringElement};
    use crate::ops::{dilate, erode};
    use crate::util::MorphError;
    use crate::OwnedImage;

    #[test]
    fn subtraction_clamps_at_zero() {
        let a = OwnedImage::new(vec![10, 200, 0, 255], 2, 2).unwrap();
        let b = OwnedImage::new(vec![20, 100, 255, 0], 2, 2).unwrap();
        let diff = subtract_saturating(a.view(), b.view()).unwrap();
        assert_eq!(diff.data(), &[0, 100, 0, 255]);
    }

    #[test]
    fn subtraction_rejects_shape_mismatch() {
        let a = OwnedImage::filled(2, 3, 0).unwrap();
        let b = OwnedImage::filled(3, 2, 0).unwrap();
        let err = subtract_saturating(a.view(), b.view()).err().unwrap();
        assert_eq!(
            err,
            MorphError::ShapeMismatch {
                left_width: 2,
                left_height: 3,
                right_width: 3,
                right_height: 2,
            }
        );
    }

    #[test]
    fn opening_removes_isolated_bright_pixel() {
        let mut data = vec![20u8; 49];
        data[3 * 7 + 3] = 220;
        let image = OwnedImage::new(data, 7, 7).unwrap();
        let se = StructuringElement::square(3).unwrap();

        let opened = open(image.view(), &se);
        assert!(opened.data().iter().all(|&v| v == 20));

        let wth = white_top_hat(image.view(), &se);
        assert_eq!(wth.get(3, 3), Some(200));
        assert_eq!(wth.data().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn closing_fills_isolated_dark_pixel() {
        let mut data = vec![180u8; 49];
        data[2 * 7 + 4] = 30;
        let image = OwnedImage::new(data, 7, 7).unwrap();
        let se = StructuringElement::square(3).unwrap();

        let closed = close(image.view(), &se);
        assert!(closed.data().iter().all(|&v| v == 180));

        let bth = black_top_hat(image.view(), &se);
        assert_eq!(bth.get(4, 2), Some(150));
        assert_eq!(bth.data().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn top_hat_saturates_when_opening_brightens() {
        // Anchor excluded and only the right neighbour included: the opening
        // reads two pixels to the right and can exceed the input.
        let mut mask = Mask::new(2, 1, true).unwrap();
        mask.set(0, 0, false).unwrap();
        let se = StructuringElement::new(mask, (0, 0)).unwrap();
        let image = OwnedImage::new(vec![10, 20, 30, 40, 50], 5, 1).unwrap();

        let opened = open(image.view(), &se);
        assert_eq!(opened.data(), &[30, 40, 50, 255, 0]);

        let wth = white_top_hat(image.view(), &se);
        assert_eq!(wth.data(), &[0, 0, 0, 0, 50]);
    }

    #[test]
    fn asymmetric_element_needs_reflection_for_ordering() {
        let se = StructuringElement::rect(2, 1).unwrap();
        let se = StructuringElement::new(se.mask().clone(), (0, 0)).unwrap();

        let rising = OwnedImage::new(vec![0, 10, 10], 3, 1).unwrap();
        assert_eq!(open(rising.view(), &se).data(), &[10, 10, 10]);
        let eroded = erode(rising.view(), &se);
        let opened = dilate(eroded.view(), &se.reflect());
        assert_eq!(opened.data(), &[0, 10, 10]);

        let falling = OwnedImage::new(vec![10, 10, 0], 3, 1).unwrap();
        assert_eq!(close(falling.view(), &se).data(), &[10, 0, 0]);
        let dilated = dilate(falling.view(), &se.reflect());
        let closed = erode(dilated.view(), &se);
        assert_eq!(closed.data(), &[10, 10, 10]);
    }

    #[test]
    fn gradient_of_step_edge() {
        let image = OwnedImage::from_fn(6, 1, |x, _| if x < 3 { 10 } else { 90 }).unwrap();
        let se = StructuringElement::rect(3, 1).unwrap();
        let grad = gradient(image.view(), &se);
        assert_eq!(grad.data(), &[0, 0, 80, 80, 0, 0]);
    }
}
