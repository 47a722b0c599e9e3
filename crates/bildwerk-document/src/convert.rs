// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-file tools: image recompression, JPEG/PNG conversion, PDF
// compaction, and one-image PDF creation.
//
// Each tool is a one-shot transform from input bytes to output bytes. The
// result carries both sizes so callers can show how much was saved.

use std::path::PathBuf;

use bildwerk_core::error::Result;
use bildwerk_core::{Quality, ToolConfig, ToolKind};
use tracing::{info, instrument};

use crate::commit::CommitPipeline;
use crate::image::decoder::RasterDecoder;
use crate::image::processor::ImageProcessor;
use crate::pdf::compact::PdfCompactor;
use crate::pdf::writer::PdfAssembler;
use crate::staging::StagedFile;
use crate::traits::DownloadTrigger;

/// Output of one tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub tool: ToolKind,
    pub filename: String,
    pub bytes: Vec<u8>,
    pub original_size: usize,
}

impl ToolOutput {
    pub fn output_size(&self) -> usize {
        self.bytes.len()
    }

    /// "Original size / new size" line in KB.
    pub fn size_summary(&self) -> String {
        format!(
            "Original size: {:.1} KB, {} size: {:.1} KB",
            self.original_size as f64 / 1024.0,
            match self.tool {
                ToolKind::CompressImage | ToolKind::CompressPdf => "Compressed",
                _ => "Output",
            },
            self.output_size() as f64 / 1024.0
        )
    }

    /// Hand the output to `download` under its filename.
    pub fn save<T: DownloadTrigger + ?Sized>(&self, download: &T) -> Result<PathBuf> {
        download.save(&self.filename, &self.bytes)
    }
}

/// Runs the single-file tools with a shared configuration.
pub struct DocumentConverter {
    config: ToolConfig,
}

impl DocumentConverter {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Apply `tool` to `input`.
    ///
    /// `requested_name` is the user's output filename; blank or missing
    /// falls back to the tool's default.
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    pub fn run(
        &self,
        tool: ToolKind,
        source_name: &str,
        input: &[u8],
        requested_name: Option<&str>,
    ) -> Result<ToolOutput> {
        let bytes = match tool {
            ToolKind::CompressImage => compress_image(input, self.config.compression_quality)?,
            ToolKind::ConvertToJpeg => compress_image(input, self.config.conversion_quality)?,
            ToolKind::ConvertToPng => convert_to_png(input)?,
            ToolKind::CompressPdf => compress_pdf(input)?,
            ToolKind::ImagesToPdf => {
                let file = StagedFile::new(source_name, input.to_vec());
                let assembler = PdfAssembler::new(self.config.page_size());
                let (pdf, _pages) =
                    CommitPipeline::new(RasterDecoder).assemble(&[file], assembler)?;
                pdf
            }
        };

        let output = ToolOutput {
            tool,
            filename: self.config.output_name(tool, requested_name),
            bytes,
            original_size: input.len(),
        };
        info!(
            source = source_name,
            filename = %output.filename,
            original = output.original_size,
            output = output.output_size(),
            "Tool finished"
        );
        Ok(output)
    }
}

/// Re-encode any decodable image as JPEG at `quality`.
pub fn compress_image(input: &[u8], quality: Quality) -> Result<Vec<u8>> {
    ImageProcessor::from_bytes(input)?.to_jpeg_bytes(quality)
}

/// Convert any decodable image to JPEG at the standard conversion quality.
pub fn convert_to_jpeg(input: &[u8]) -> Result<Vec<u8>> {
    compress_image(input, Quality::CONVERSION)
}

/// Re-encode any decodable image as lossless PNG.
pub fn convert_to_png(input: &[u8]) -> Result<Vec<u8>> {
    ImageProcessor::from_bytes(input)?.to_png_bytes()
}

/// Re-serialise a PDF with unused objects dropped and streams compressed.
pub fn compress_pdf(input: &[u8]) -> Result<Vec<u8>> {
    PdfCompactor::from_bytes(input)?.compact()
}
