// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster decoding for the commit pipeline.

use bildwerk_core::error::Result;
use image::DynamicImage;

use super::processor::ImageProcessor;
use crate::layout::ImageDimensions;
use crate::traits::ImageDecoder;

/// A decoded raster. Lives only while its page is being placed.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::from((self.width(), self.height()))
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

/// Decoder for every raster format the `image` crate was built with.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let processor = ImageProcessor::from_bytes(bytes)?;
        Ok(DecodedImage::new(processor.into_dynamic()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn decodes_png_dimensions() {
        let png = ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            12,
            7,
            Rgb([10, 20, 30]),
        )))
        .to_png_bytes()
        .expect("encode");

        let decoded = RasterDecoder.decode(&png).expect("decode");
        assert_eq!(decoded.dimensions(), ImageDimensions::new(12.0, 7.0));
    }

    #[test]
    fn rejects_truncated_payload() {
        assert!(RasterDecoder.decode(&[0x89, b'P', b'N', b'G']).is_err());
    }
}
