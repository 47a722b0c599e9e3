// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF compactor: re-serialise an existing PDF with unused objects dropped,
// every stream compressed, and indirect objects packed into object streams,
// using the `lopdf` crate.

use bildwerk_core::error::BildwerkError;
use lopdf::Document;
use tracing::{debug, info, instrument};

/// Loads an existing PDF and writes it back out in compacted form.
pub struct PdfCompactor {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfCompactor {
    /// Create a compactor from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BildwerkError> {
        let document = Document::load_mem(data).map_err(|err| {
            BildwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Drop unreachable and empty objects, renumber the rest densely,
    /// compress every stream, and serialise with object and cross-reference
    /// streams.
    #[instrument(skip(self), fields(pages = self.page_count()))]
    pub fn compact(mut self) -> Result<Vec<u8>, BildwerkError> {
        let pruned = self.document.prune_objects();
        let empty_streams = self.document.delete_zero_length_streams();
        self.document.renumber_objects();
        self.document.compress();

        let mut output = Vec::new();
        self.document.save_modern(&mut output).map_err(|err| {
            BildwerkError::PdfError(format!("failed to serialise compacted PDF: {}", err))
        })?;

        info!(
            pruned = pruned.len(),
            empty_streams = empty_streams.len(),
            output_bytes = output.len(),
            "PDF compacted"
        );
        Ok(output)
    }
}
