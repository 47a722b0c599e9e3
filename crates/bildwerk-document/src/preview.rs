// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview projection of the staging list.
//
// Entries are rebuilt from scratch after every mutation and own no state
// beyond what the snapshot provides. Each entry's removal handle targets the
// file's stable id, so a handle kept past a mutation cannot remove the wrong
// file.

use std::fmt;

use bildwerk_core::StagedId;
use bildwerk_core::error::Result;
use tracing::{instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::staging::{StagedFile, StagingList};

/// Removal affordance for one rendered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalHandle {
    index: usize,
    id: StagedId,
}

impl RemovalHandle {
    /// Position of the file when the entry was rendered.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> StagedId {
        self.id
    }

    /// Remove the file this handle was rendered for.
    ///
    /// Fails with `UnknownStagedFile` if it has already been removed.
    pub fn apply(&self, list: &mut StagingList) -> Result<StagedFile> {
        list.remove(self.id)
    }
}

/// A small PNG rendition of a staged image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// One rendered element of the staging list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub position: usize,
    pub name: String,
    pub size_bytes: usize,
    pub thumbnail: Option<Thumbnail>,
    pub remove: RemovalHandle,
}

impl fmt::Display for PreviewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({:.1} KB)",
            self.position,
            self.name,
            self.size_bytes as f64 / 1024.0
        )?;
        if let Some(thumb) = &self.thumbnail {
            write!(f, " {}x{}", thumb.width, thumb.height)?;
        }
        Ok(())
    }
}

/// Projects a staging snapshot into preview entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewRenderer {
    thumbnail_edge: Option<u32>,
}

impl PreviewRenderer {
    /// Renderer producing entries without thumbnails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that also decodes each file into a thumbnail no larger than
    /// `max_edge` on either side.
    pub fn with_thumbnails(max_edge: u32) -> Self {
        Self {
            thumbnail_edge: Some(max_edge.max(1)),
        }
    }

    /// One entry per staged file, in staging order.
    #[instrument(skip_all, fields(files = snapshot.len()))]
    pub fn render(&self, snapshot: &[StagedFile]) -> Vec<PreviewEntry> {
        snapshot
            .iter()
            .enumerate()
            .map(|(position, file)| PreviewEntry {
                position,
                name: file.name().to_string(),
                size_bytes: file.len(),
                thumbnail: self
                    .thumbnail_edge
                    .and_then(|edge| thumbnail_for(file, edge)),
                remove: RemovalHandle {
                    index: position,
                    id: file.id(),
                },
            })
            .collect()
    }
}

/// Undecodable files get no thumbnail; a preview never fails.
fn thumbnail_for(file: &StagedFile, max_edge: u32) -> Option<Thumbnail> {
    let render = || -> Result<Thumbnail> {
        let thumb = ImageProcessor::from_bytes(file.bytes())?.thumbnail(max_edge);
        Ok(Thumbnail {
            width: thumb.width(),
            height: thumb.height(),
            png: thumb.to_png_bytes()?,
        })
    };
    match render() {
        Ok(thumb) => Some(thumb),
        Err(err) => {
            warn!(name = file.name(), %err, "No thumbnail for staged file");
            None
        }
    }
}
