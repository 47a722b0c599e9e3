// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator seams for the commit pipeline.
//
// Decoding, document assembly, and file delivery are delegated to these
// traits so the pipeline can be driven by the real `image`/`printpdf`
// implementations or by test doubles.

use std::path::PathBuf;

use bildwerk_core::PageSize;
use bildwerk_core::error::Result;

use crate::image::decoder::DecodedImage;
use crate::layout::Placement;

/// Turns a raw file payload into a decoded raster.
pub trait ImageDecoder {
    /// Decode `bytes`. Corrupt or unsupported payloads return an error.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;
}

/// Accumulates placed images into a multi-page document.
///
/// `seal` consumes the assembler, so a document can be serialized at most
/// once and never observed half-built.
pub trait DocumentAssembler {
    /// The fixed page every image is placed onto.
    fn page_size(&self) -> PageSize;

    /// Append one page holding `image` at `placement`.
    fn append_page(&mut self, image: &DecodedImage, placement: &Placement) -> Result<()>;

    /// Number of pages appended so far.
    fn page_count(&self) -> usize;

    /// Serialize the finished document.
    fn seal(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Materializes a named output file for the user.
pub trait DownloadTrigger {
    /// Deliver `bytes` under `filename`, returning where they ended up.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}
