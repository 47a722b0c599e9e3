// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image-to-PDF session: the staging list, its preview, and the commit
// trigger wired together.
//
// Every mutation takes its snapshot while still holding the staging lock, so
// the returned entries describe the list exactly as that mutation left it.
// Rendering (and thumbnail decoding) happens after the lock is released.

use bildwerk_core::error::Result;
use bildwerk_core::{ToolConfig, ToolKind};
use tracing::{info, instrument};

use crate::commit::{CommitPipeline, CommitReport, CommitTrigger};
use crate::pdf::writer::PdfAssembler;
use crate::preview::{PreviewEntry, PreviewRenderer, RemovalHandle};
use crate::staging::{SharedStagingList, StagedFile};
use crate::traits::{DownloadTrigger, ImageDecoder};

/// One image-to-PDF workspace.
#[derive(Debug, Clone)]
pub struct ImageToPdfSession {
    staging: SharedStagingList,
    commit: CommitTrigger,
    renderer: PreviewRenderer,
    config: ToolConfig,
}

impl ImageToPdfSession {
    pub fn new(config: ToolConfig) -> Self {
        let renderer = match config.thumbnail_edge {
            0 => PreviewRenderer::new(),
            edge => PreviewRenderer::with_thumbnails(edge),
        };
        Self {
            staging: SharedStagingList::new(),
            commit: CommitTrigger::new(),
            renderer,
            config,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Handle to the underlying list; clones share state with the session.
    pub fn staging(&self) -> &SharedStagingList {
        &self.staging
    }

    pub fn preview(&self) -> Vec<PreviewEntry> {
        self.renderer.render(&self.staging.snapshot())
    }

    /// Stage `files` (all or none) and return the new preview.
    #[instrument(skip_all, fields(count = files.len()))]
    pub fn add(&self, files: Vec<StagedFile>) -> Result<Vec<PreviewEntry>> {
        let snapshot = self.staging.with(|list| -> Result<Vec<StagedFile>> {
            list.add(files)?;
            Ok(list.snapshot().to_vec())
        })?;
        Ok(self.renderer.render(&snapshot))
    }

    /// Remove the file `handle` was rendered for and return the new preview.
    pub fn remove(&self, handle: &RemovalHandle) -> Result<Vec<PreviewEntry>> {
        let snapshot = self.staging.with(|list| -> Result<Vec<StagedFile>> {
            handle.apply(list)?;
            Ok(list.snapshot().to_vec())
        })?;
        Ok(self.renderer.render(&snapshot))
    }

    /// Remove the file at `index` and return the new preview.
    pub fn remove_at(&self, index: usize) -> Result<Vec<PreviewEntry>> {
        let snapshot = self.staging.with(|list| -> Result<Vec<StagedFile>> {
            list.remove_at(index)?;
            Ok(list.snapshot().to_vec())
        })?;
        Ok(self.renderer.render(&snapshot))
    }

    /// Build one PDF from the current snapshot and hand it to `download`.
    ///
    /// The staging list is left untouched either way. A second commit
    /// started while this one runs fails with `CommitInProgress`.
    #[instrument(skip_all)]
    pub fn commit<D, T>(
        &self,
        decoder: D,
        download: &T,
        filename: Option<&str>,
    ) -> Result<CommitReport>
    where
        D: ImageDecoder,
        T: DownloadTrigger + ?Sized,
    {
        let _guard = self.commit.try_begin()?;
        let files = self.staging.snapshot();
        let filename = self.config.output_name(ToolKind::ImagesToPdf, filename);
        info!(files = files.len(), filename = %filename, "Starting commit");

        let assembler = PdfAssembler::new(self.config.page_size());
        CommitPipeline::new(decoder).run(&files, assembler, download, &filename)
    }
}

impl Default for ImageToPdfSession {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}
