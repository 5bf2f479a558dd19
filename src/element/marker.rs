//! Marker-image parsing.
//!
//! Colours are matched exactly; there is no tolerance for antialiased or
//! near-red pixels.
//!
//! Pixels are visited column-major (`x` outer, `y` inner). When several
//! pixels are pure red, the last one visited becomes the anchor. When none
//! is, the anchor falls back to `(0, 0)`, which silently shifts the window;
//! both cases emit a warning under the `tracing` feature and are visible
//! through [`MarkerScan::anchor_count`].

use crate::element::{Mask, StructuringElement};
use crate::trace::trace_warn;
use crate::util::{MorphError, MorphResult};

/// RGB value marking the anchor cell.
pub const ANCHOR_RGB: [u8; 3] = [255, 0, 0];

/// RGB value marking an excluded cell.
pub const EXCLUDED_RGB: [u8; 3] = [0, 0, 0];

/// Result of scanning a marker image.
#[derive(Clone, Debug)]
pub struct MarkerScan {
    /// Parsed element.
    pub element: StructuringElement,
    /// Number of pure-red pixels found. Anything other than 1 means the
    /// anchor was chosen by fallback or by scan order.
    pub anchor_count: usize,
}

/// Scans interleaved RGB bytes (`width * height * 3`, row-major).
pub fn scan_rgb(data: &[u8], width: usize, height: usize) -> MorphResult<MarkerScan> {
    if width == 0 || height == 0 {
        return Err(MorphError::MalformedKernel { width, height });
    }
    let needed = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(3))
        .ok_or(MorphError::MalformedKernel { width, height })?;
    if data.len() != needed {
        return Err(MorphError::RgbBufferMismatch {
            needed,
            got: data.len(),
        });
    }

    let mut mask = Mask::new(width, height, true)?;
    let mut anchor = (0, 0);
    let mut anchor_count = 0usize;

    for x in 0..width {
        for y in 0..height {
            let idx = (y * width + x) * 3;
            let px = &data[idx..idx + 3];
            if *px == ANCHOR_RGB {
                anchor = (x, y);
                anchor_count += 1;
            } else if *px == EXCLUDED_RGB {
                mask.set(x, y, false)?;
            }
        }
    }

    match anchor_count {
        0 => {
            trace_warn!(
                "marker image has no anchor pixel; anchor defaults to (0, 0)",
                width = width,
                height = height
            );
        }
        1 => {}
        n => {
            trace_warn!(
                "marker image has several anchor pixels; last in column-major order wins",
                count = n,
                x = anchor.0,
                y = anchor.1
            );
        }
    }

    let element = StructuringElement::new(mask, anchor)?;
    Ok(MarkerScan {
        element,
        anchor_count,
    })
}
