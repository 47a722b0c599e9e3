// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildwerk toolbox.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of files the image-to-PDF staging list may hold.
pub const MAX_STAGED_FILES: usize = 100;

/// Stable identifier for a staged file.
///
/// Survives reordering of the staging list, so a removal bound to an id can
/// never hit a different file than the one it was rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StagedId(pub Uuid);

impl StagedId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StagedId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StagedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The independent tools offered by Bildwerk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Batch image-to-PDF assembly.
    ImagesToPdf,
    /// Lossy JPEG recompression.
    CompressImage,
    /// Format conversion to JPEG.
    ConvertToJpeg,
    /// Format conversion to PNG.
    ConvertToPng,
    /// PDF re-serialization with compaction.
    CompressPdf,
}

impl ToolKind {
    /// Filename offered when the user does not supply one.
    pub fn default_filename(&self) -> &'static str {
        match self {
            Self::ImagesToPdf => "images.pdf",
            Self::CompressImage => "compressed.jpg",
            Self::ConvertToJpeg => "image.jpg",
            Self::ConvertToPng => "image.png",
            Self::CompressPdf => "compressed.pdf",
        }
    }

    /// MIME type of the tool's output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::ImagesToPdf | Self::CompressPdf => "application/pdf",
            Self::CompressImage | Self::ConvertToJpeg => "image/jpeg",
            Self::ConvertToPng => "image/png",
        }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Portrait dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Resolve the page rectangle for the given orientation.
    pub fn page_size(&self, orientation: Orientation) -> PageSize {
        let (w, h) = self.dimensions_mm();
        let (short, long) = (w.min(h) as f64, w.max(h) as f64);
        match orientation {
            Orientation::Portrait => PageSize::new(short, long),
            Orientation::Landscape => PageSize::new(long, short),
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// A page rectangle in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// A4 portrait, the default output page.
    pub fn a4() -> Self {
        PaperSize::A4.page_size(Orientation::Portrait)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::a4()
    }
}

/// Lossy encoding quality on a 0–1 scale.
///
/// Deserialised values go through [`Quality::new`], so they are clamped too.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Quality(f32);

impl Quality {
    /// Quality used by the image compression tool.
    pub const COMPRESSION: Quality = Quality(0.6);
    /// Quality used by plain JPEG conversion (matches common browser encoders).
    pub const CONVERSION: Quality = Quality(0.92);

    /// Create a quality value, clamping into `0.0..=1.0`. NaN becomes the
    /// compression default.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::COMPRESSION;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Map onto the 1–100 scale JPEG encoders expect.
    pub fn as_jpeg_quality(&self) -> u8 {
        ((self.0 * 100.0).round() as u8).clamp(1, 100)
    }
}

impl From<f32> for Quality {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Quality> for f32 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::COMPRESSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filenames_match_tools() {
        assert_eq!(ToolKind::ImagesToPdf.default_filename(), "images.pdf");
        assert_eq!(ToolKind::CompressImage.default_filename(), "compressed.jpg");
        assert_eq!(ToolKind::ConvertToJpeg.default_filename(), "image.jpg");
        assert_eq!(ToolKind::ConvertToPng.default_filename(), "image.png");
        assert_eq!(ToolKind::CompressPdf.default_filename(), "compressed.pdf");
    }

    #[test]
    fn landscape_swaps_axes() {
        let portrait = PaperSize::A4.page_size(Orientation::Portrait);
        let landscape = PaperSize::A4.page_size(Orientation::Landscape);
        assert_eq!(portrait, PageSize::new(210.0, 297.0));
        assert_eq!(landscape, PageSize::new(297.0, 210.0));
    }

    #[test]
    fn quality_maps_to_jpeg_scale() {
        assert_eq!(Quality::COMPRESSION.as_jpeg_quality(), 60);
        assert_eq!(Quality::CONVERSION.as_jpeg_quality(), 92);
        assert_eq!(Quality::new(0.0).as_jpeg_quality(), 1);
        assert_eq!(Quality::new(7.5).value(), 1.0);
        assert_eq!(Quality::new(f32::NAN), Quality::COMPRESSION);
    }

    #[test]
    fn deserialised_quality_is_clamped() {
        let low: Quality = serde_json::from_str("-3.0").expect("parse");
        assert_eq!(low.value(), 0.0);
        let high: Quality = serde_json::from_str("4").expect("parse");
        assert_eq!(high.value(), 1.0);
        assert_eq!(serde_json::to_string(&Quality::COMPRESSION).expect("encode"), "0.6");
    }

    #[test]
    fn mime_types_match_outputs() {
        assert_eq!(ToolKind::ImagesToPdf.mime_type(), "application/pdf");
        assert_eq!(ToolKind::CompressImage.mime_type(), "image/jpeg");
        assert_eq!(ToolKind::ConvertToPng.mime_type(), "image/png");
    }

    #[test]
    fn staged_ids_are_unique() {
        assert_ne!(StagedId::new(), StagedId::new());
    }
}
