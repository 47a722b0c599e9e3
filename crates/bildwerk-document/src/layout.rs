// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout: fit an image onto a fixed page without clipping or distortion.

use bildwerk_core::PageSize;
use bildwerk_core::error::{BildwerkError, Result};
use tracing::debug;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

impl ImageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for ImageDimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f64, height as f64)
    }
}

/// Where and how large an image lands on its page.
///
/// `x`/`y` are measured from the top-left page corner; all lengths are in
/// page units (millimetres). `scale` converts image pixels to page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Origin of the placed image's lower-left corner, measured from the
    /// lower-left page corner as PDF content streams expect.
    pub fn pdf_origin(&self, page: PageSize) -> (f64, f64) {
        (self.x, page.height_mm - self.y - self.height)
    }
}

/// Computes centered, aspect-preserving placements for one page size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayoutEngine {
    page: PageSize,
}

impl PageLayoutEngine {
    pub fn new(page: PageSize) -> Self {
        Self { page }
    }

    /// Scale `image` by the largest factor that keeps it entirely on the page,
    /// then center it on both axes.
    ///
    /// The constraining axis ends up exactly as long as the page; the other
    /// axis is centered with equal gaps on either side.
    pub fn place(&self, image: ImageDimensions) -> Result<Placement> {
        let page = self.page;
        // Negated comparisons also reject NaN.
        if !(image.width > 0.0 && image.height > 0.0) {
            return Err(BildwerkError::InvalidImageDimensions {
                width: image.width,
                height: image.height,
            });
        }
        if !(page.width_mm > 0.0 && page.height_mm > 0.0) {
            return Err(BildwerkError::InvalidPageSize {
                width: page.width_mm,
                height: page.height_mm,
            });
        }

        let scale_x = page.width_mm / image.width;
        let scale_y = page.height_mm / image.height;

        // Pin the constraining axis to the page edge so rounding never pushes
        // it past the bounds.
        let (scale, width, height) = if scale_x <= scale_y {
            (scale_x, page.width_mm, (image.height * scale_x).min(page.height_mm))
        } else {
            (scale_y, (image.width * scale_y).min(page.width_mm), page.height_mm)
        };

        let placement = Placement {
            scale,
            x: (page.width_mm - width) / 2.0,
            y: (page.height_mm - height) / 2.0,
            width,
            height,
        };
        debug!(
            image_w = image.width,
            image_h = image.height,
            scale,
            x = placement.x,
            y = placement.y,
            "Image placed"
        );
        Ok(placement)
    }
}

/// Convenience wrapper around [`PageLayoutEngine::place`].
pub fn compute_placement(image: ImageDimensions, page: PageSize) -> Result<Placement> {
    PageLayoutEngine::new(page).place(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> PageSize {
        PageSize::new(210.0, 297.0)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn landscape_image_fills_page_width() {
        let p = compute_placement(ImageDimensions::new(400.0, 200.0), a4()).expect("place");
        assert_close(p.scale, 0.525);
        assert_close(p.width, 210.0);
        assert_close(p.height, 105.0);
        assert_close(p.x, 0.0);
        assert_close(p.y, 96.0);
    }

    #[test]
    fn portrait_image_fills_page_height() {
        let p = compute_placement(ImageDimensions::new(200.0, 400.0), a4()).expect("place");
        assert_close(p.scale, 0.7425);
        assert_close(p.width, 148.5);
        assert_close(p.height, 297.0);
        assert_close(p.x, 30.75);
        assert_close(p.y, 0.0);
    }

    #[test]
    fn tiny_image_is_scaled_up() {
        let p = compute_placement(ImageDimensions::new(21.0, 29.7), a4()).expect("place");
        assert_close(p.scale, 10.0);
        assert_close(p.width, 210.0);
        assert_close(p.height, 297.0);
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        for (w, h) in [(0.0, 10.0), (10.0, 0.0), (-5.0, 10.0), (f64::NAN, 10.0)] {
            let err = compute_placement(ImageDimensions::new(w, h), a4()).unwrap_err();
            assert!(matches!(err, BildwerkError::InvalidImageDimensions { .. }));
        }
    }

    #[test]
    fn degenerate_page_is_rejected() {
        let err = compute_placement(ImageDimensions::new(10.0, 10.0), PageSize::new(0.0, 297.0))
            .unwrap_err();
        assert!(matches!(err, BildwerkError::InvalidPageSize { .. }));
    }

    #[test]
    fn pdf_origin_flips_vertical_axis() {
        let page = a4();
        let p = Placement {
            scale: 1.0,
            x: 10.0,
            y: 20.0,
            width: 50.0,
            height: 100.0,
        };
        assert_eq!(p.pdf_origin(page), (10.0, 177.0));
    }
}
