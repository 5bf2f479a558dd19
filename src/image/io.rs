//! Bridges to the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Colour conversion
//! happens here, before pixels reach the engine: targets go through
//! `to_luma8`, marker images through `to_rgb8`.

use crate::element::marker::{scan_rgb, MarkerScan};
use crate::element::StructuringElement;
use crate::image::{ImageView, OwnedImage};
use crate::util::{MorphError, MorphResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> MorphResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Creates an owned grayscale image from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> MorphResult<OwnedImage> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Converts an owned image back into an `image::GrayImage`.
pub fn to_gray_image(img: &OwnedImage) -> MorphResult<image::GrayImage> {
    let (width, height) = img.dims();
    let invalid = MorphError::InvalidDimensions { width, height };
    let w = u32::try_from(width).map_err(|_| invalid.clone())?;
    let h = u32::try_from(height).map_err(|_| invalid.clone())?;
    image::GrayImage::from_raw(w, h, img.data().to_vec()).ok_or(invalid)
}

/// Parses a marker image of any colour type.
pub fn marker_from_dynamic_image(img: &image::DynamicImage) -> MorphResult<MarkerScan> {
    let rgb = img.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    scan_rgb(rgb.as_raw(), width, height)
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> MorphResult<OwnedImage> {
    let img = open(path.as_ref())?;
    owned_from_dynamic_image(&img)
}

/// Loads a marker image from disk and parses it into a structuring element.
///
/// Decode failures are reported as `ResourceUnavailable`; a zero-sized image
/// as `MalformedKernel`.
pub fn load_structuring_element<P: AsRef<Path>>(path: P) -> MorphResult<StructuringElement> {
    load_marker(path).map(|scan| scan.element)
}

/// Like [`load_structuring_element`] but keeps the marker statistics.
pub fn load_marker<P: AsRef<Path>>(path: P) -> MorphResult<MarkerScan> {
    let img = open(path.as_ref())?;
    marker_from_dynamic_image(&img)
}

/// Saves a grayscale image; the format follows the path extension.
pub fn save_gray_image<P: AsRef<Path>>(img: &OwnedImage, path: P) -> MorphResult<()> {
    let path = path.as_ref();
    to_gray_image(img)?
        .save(path)
        .map_err(|err| MorphError::ResourceUnavailable {
            reason: format!("{}: {err}", path.display()),
        })
}

fn open(path: &Path) -> MorphResult<image::DynamicImage> {
    image::open(path).map_err(|err| MorphError::ResourceUnavailable {
        reason: format!("{}: {err}", path.display()),
    })
}
