use graymorph::{ImageView, Mask, MorphError, OwnedImage, StructuringElement};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        MorphError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        MorphError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        MorphError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, MorphError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn contiguous_view_rejects_interleaved_colour_buffer() {
    let rgb = [0u8; 2 * 2 * 3];

    let err = ImageView::from_slice(&rgb, 2, 2).err().unwrap();
    assert_eq!(
        err,
        MorphError::ChannelMismatch {
            expected: 4,
            got: 12,
        }
    );
}

#[test]
fn strided_view_reads_expected_values() {
    let data: Vec<u8> = (0u8..12).collect();
    let view = ImageView::new(&data, 3, 3, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.row(1).unwrap(), &[4u8, 5u8, 6u8]);
    assert_eq!(view.get(2, 2).copied(), Some(10u8));
    assert!(view.get(3, 0).is_none());
    assert!(view.row(3).is_none());
}

#[test]
fn owned_image_constructors() {
    let img = OwnedImage::from_fn(3, 2, |x, y| (x + 10 * y) as u8).unwrap();
    assert_eq!(img.dims(), (3, 2));
    assert_eq!(img.data(), &[0u8, 1, 2, 10, 11, 12]);

    let flat = OwnedImage::filled(2, 2, 128).unwrap();
    assert!(flat.data().iter().all(|&v| v == 128));

    let err = OwnedImage::new(vec![0u8; 3], 2, 2).err().unwrap();
    assert_eq!(err, MorphError::BufferTooSmall { needed: 4, got: 3 });

    let err = OwnedImage::filled(0, 3, 0).err().unwrap();
    assert_eq!(
        err,
        MorphError::InvalidDimensions {
            width: 0,
            height: 3,
        }
    );
}

#[test]
fn identity_element_shape() {
    let se = StructuringElement::identity();
    assert_eq!(se.size(), (1, 1));
    assert_eq!(se.anchor(), (0, 0));
    assert!(se.anchor_included());
}

#[test]
fn rect_element_anchors_at_centre() {
    let se = StructuringElement::rect(4, 3).unwrap();
    assert_eq!(se.anchor(), (2, 1));
    assert_eq!(se.mask().count_included(), 12);

    let err = StructuringElement::rect(0, 3).err().unwrap();
    assert_eq!(
        err,
        MorphError::MalformedKernel {
            width: 0,
            height: 3,
        }
    );
}

#[test]
fn element_reports_excluded_anchor() {
    let mut mask = Mask::new(3, 3, true).unwrap();
    mask.set(1, 1, false).unwrap();
    let se = StructuringElement::new(mask, (1, 1)).unwrap();
    assert!(!se.anchor_included());
    assert_eq!(se.mask().count_included(), 8);
}
