// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Orientation, PageSize, PaperSize, Quality, ToolKind};

/// Settings shared by all tools. Every field has a documented default, so a
/// partial JSON file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Paper size for image-to-PDF pages.
    pub paper_size: PaperSize,
    /// Orientation for image-to-PDF pages.
    pub orientation: Orientation,
    /// JPEG quality for the compression tool (default 0.6).
    pub compression_quality: Quality,
    /// JPEG quality for plain format conversion (default 0.92).
    pub conversion_quality: Quality,
    /// Longest edge of preview thumbnails, in pixels.
    pub thumbnail_edge: u32,
    /// Output filename overrides, keyed by tool.
    pub filenames: OutputNames,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            compression_quality: Quality::COMPRESSION,
            conversion_quality: Quality::CONVERSION,
            thumbnail_edge: 128,
            filenames: OutputNames::default(),
        }
    }
}

impl ToolConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Page rectangle implied by `paper_size` and `orientation`.
    pub fn page_size(&self) -> PageSize {
        self.paper_size.page_size(self.orientation)
    }

    /// Pick the output name: the user's choice if non-blank, otherwise the
    /// configured default for the tool.
    pub fn output_name(&self, tool: ToolKind, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.filenames.for_tool(tool).to_string(),
        }
    }
}

/// Default output filenames per tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    pub images_pdf: String,
    pub compressed_image: String,
    pub jpeg: String,
    pub png: String,
    pub compressed_pdf: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            images_pdf: ToolKind::ImagesToPdf.default_filename().into(),
            compressed_image: ToolKind::CompressImage.default_filename().into(),
            jpeg: ToolKind::ConvertToJpeg.default_filename().into(),
            png: ToolKind::ConvertToPng.default_filename().into(),
            compressed_pdf: ToolKind::CompressPdf.default_filename().into(),
        }
    }
}

impl OutputNames {
    pub fn for_tool(&self, tool: ToolKind) -> &str {
        match tool {
            ToolKind::ImagesToPdf => &self.images_pdf,
            ToolKind::CompressImage => &self.compressed_image,
            ToolKind::ConvertToJpeg => &self.jpeg,
            ToolKind::ConvertToPng => &self.png,
            ToolKind::CompressPdf => &self.compressed_pdf,
        }
    }
}
