// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: decode, thumbnail, and re-encode (JPEG/PNG) in-memory
// images using the `image` crate.

use bildwerk_core::Quality;
use bildwerk_core::error::BildwerkError;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// ```ignore
/// let jpeg = ImageProcessor::from_bytes(&png_bytes)?
///     .to_jpeg_bytes(Quality::COMPRESSION)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BildwerkError> {
        let img = image::load_from_memory(data).map_err(|err| {
            BildwerkError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Shrink the image to fit within `max_edge` x `max_edge`, preserving
    /// aspect ratio. Images already small enough are left alone.
    #[instrument(skip(self))]
    pub fn thumbnail(self, max_edge: u32) -> Self {
        if self.image.width() <= max_edge && self.image.height() <= max_edge {
            return self;
        }
        let thumb = self.image.thumbnail(max_edge, max_edge);
        debug!(
            new_w = thumb.width(),
            new_h = thumb.height(),
            "Thumbnail generated"
        );
        Self { image: thumb }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, BildwerkError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode the current image as JPEG bytes at `quality`.
    ///
    /// JPEG carries no alpha channel, so any transparency is dropped.
    pub fn to_jpeg_bytes(&self, quality: Quality) -> Result<Vec<u8>, BildwerkError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            &mut buffer,
            quality.as_jpeg_quality(),
        );
        rgb.write_with_encoder(encoder).map_err(|err| {
            BildwerkError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        debug!(
            quality = quality.value(),
            bytes = buffer.len(),
            "JPEG encoded"
        );
        Ok(buffer)
    }
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, BildwerkError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(|err| {
        BildwerkError::ImageError(format!("image encoding failed: {}", err))
    })?;
    Ok(buffer)
}
