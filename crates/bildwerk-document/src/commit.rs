// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Commit pipeline: turn the staged files into one PDF.
//
// Files are processed strictly in staging order:
//
//   Idle → Decoding(i) → Placing(i) → Appending(i) → … → Sealing → Done
//
// Any failure moves the pipeline to `Failed` and aborts the whole commit; the
// assembler is dropped unsealed, so no partial document ever reaches the
// download trigger.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bildwerk_core::error::{BildwerkError, Result};
use tracing::{debug, info, instrument, warn};

use crate::layout::PageLayoutEngine;
use crate::staging::StagedFile;
use crate::traits::{DocumentAssembler, DownloadTrigger, ImageDecoder};

/// Where the pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    /// Nothing started (or rejected before starting).
    Idle,
    /// Decoding the file at this index.
    Decoding(usize),
    /// Computing the placement for the file at this index.
    Placing(usize),
    /// Adding the page for the file at this index.
    Appending(usize),
    /// Serialising the finished document.
    Sealing,
    /// Document sealed.
    Done,
    /// Aborted; nothing was produced.
    Failed,
}

/// Summary of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub filename: String,
    pub location: PathBuf,
    pub pages: usize,
    pub bytes: usize,
}

/// Drives staged files through decode, placement, and assembly.
pub struct CommitPipeline<D> {
    decoder: D,
    state: CommitState,
    transitions: Vec<CommitState>,
}

impl<D: ImageDecoder> CommitPipeline<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            state: CommitState::Idle,
            transitions: Vec::new(),
        }
    }

    pub fn state(&self) -> CommitState {
        self.state
    }

    /// Every state entered during the last run, in order.
    pub fn transitions(&self) -> &[CommitState] {
        &self.transitions
    }

    fn enter(&mut self, next: CommitState) {
        debug!(from = ?self.state, to = ?next, "Commit transition");
        self.state = next;
        self.transitions.push(next);
    }

    /// Assemble `files` and hand the sealed document to `download` as
    /// `filename`.
    #[instrument(skip_all, fields(files = files.len(), filename = %filename))]
    pub fn run<A, T>(
        &mut self,
        files: &[StagedFile],
        assembler: A,
        download: &T,
        filename: &str,
    ) -> Result<CommitReport>
    where
        A: DocumentAssembler,
        T: DownloadTrigger + ?Sized,
    {
        let (bytes, pages) = self.assemble(files, assembler)?;

        let location = download.save(filename, &bytes).inspect_err(|err| {
            warn!(%err, "Download failed");
            self.enter(CommitState::Failed);
        })?;

        info!(pages, bytes = bytes.len(), location = %location.display(), "Commit complete");
        Ok(CommitReport {
            filename: filename.to_string(),
            location,
            pages,
            bytes: bytes.len(),
        })
    }

    /// Decode, place, and append every file, then seal. Returns the
    /// serialised document and its page count.
    ///
    /// An empty `files` fails with `EmptyInput` without leaving `Idle`.
    pub fn assemble<A: DocumentAssembler>(
        &mut self,
        files: &[StagedFile],
        assembler: A,
    ) -> Result<(Vec<u8>, usize)> {
        self.transitions.clear();
        self.state = CommitState::Idle;

        if files.is_empty() {
            warn!("Commit requested with nothing staged");
            return Err(BildwerkError::EmptyInput);
        }

        self.assemble_pages(files, assembler).inspect_err(|err| {
            warn!(%err, "Commit aborted");
            self.enter(CommitState::Failed);
        })
    }

    fn assemble_pages<A: DocumentAssembler>(
        &mut self,
        files: &[StagedFile],
        mut assembler: A,
    ) -> Result<(Vec<u8>, usize)> {
        let engine = PageLayoutEngine::new(assembler.page_size());

        for (index, file) in files.iter().enumerate() {
            self.enter(CommitState::Decoding(index));
            let decoded = self
                .decoder
                .decode(file.bytes())
                .map_err(|err| decode_failure(index, file, err))?;

            self.enter(CommitState::Placing(index));
            let placement = engine
                .place(decoded.dimensions())
                .map_err(|err| decode_failure(index, file, err))?;

            self.enter(CommitState::Appending(index));
            assembler.append_page(&decoded, &placement)?;
        }

        self.enter(CommitState::Sealing);
        let pages = assembler.page_count();
        let bytes = assembler.seal()?;
        self.enter(CommitState::Done);
        Ok((bytes, pages))
    }
}

fn decode_failure(index: usize, file: &StagedFile, err: BildwerkError) -> BildwerkError {
    BildwerkError::DecodeFailure {
        index,
        name: file.name().to_string(),
        reason: err.to_string(),
    }
}

/// Refuses to start a commit while another is in flight.
#[derive(Debug, Clone, Default)]
pub struct CommitTrigger {
    in_flight: Arc<AtomicBool>,
}

impl CommitTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the trigger. It is released when the returned guard drops.
    pub fn try_begin(&self) -> Result<CommitGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BildwerkError::CommitInProgress)?;
        Ok(CommitGuard {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of one commit.
#[derive(Debug)]
pub struct CommitGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for CommitGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use bildwerk_core::PageSize;
    use image::{DynamicImage, RgbImage};

    use crate::image::decoder::DecodedImage;
    use crate::layout::Placement;

    /// Decodes `[w, h]` payloads into blank images; anything else fails.
    struct FakeDecoder;

    impl ImageDecoder for FakeDecoder {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
            match bytes {
                [w, h] => Ok(DecodedImage::new(DynamicImage::ImageRgb8(RgbImage::new(
                    *w as u32, *h as u32,
                )))),
                _ => Err(BildwerkError::ImageError("unrecognised payload".into())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingAssembler {
        placements: Vec<Placement>,
    }

    impl DocumentAssembler for RecordingAssembler {
        fn page_size(&self) -> PageSize {
            PageSize::a4()
        }

        fn append_page(&mut self, _image: &DecodedImage, placement: &Placement) -> Result<()> {
            self.placements.push(*placement);
            Ok(())
        }

        fn page_count(&self) -> usize {
            self.placements.len()
        }

        fn seal(self) -> Result<Vec<u8>> {
            Ok(format!("pages={}", self.placements.len()).into_bytes())
        }
    }

    #[derive(Default)]
    struct MemoryDownload {
        saved: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl DownloadTrigger for MemoryDownload {
        fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
            self.saved
                .borrow_mut()
                .push((filename.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(filename))
        }
    }

    fn file(name: &str, payload: &[u8]) -> StagedFile {
        StagedFile::new(name, payload.to_vec())
    }

    #[test]
    fn empty_commit_is_rejected_before_starting() {
        let mut pipeline = CommitPipeline::new(FakeDecoder);
        let download = MemoryDownload::default();

        let err = pipeline
            .run(&[], RecordingAssembler::default(), &download, "images.pdf")
            .unwrap_err();

        assert!(matches!(err, BildwerkError::EmptyInput));
        assert_eq!(pipeline.state(), CommitState::Idle);
        assert!(pipeline.transitions().is_empty());
        assert!(download.saved.borrow().is_empty());
    }

    #[test]
    fn second_file_failing_aborts_whole_commit() {
        let mut pipeline = CommitPipeline::new(FakeDecoder);
        let download = MemoryDownload::default();
        let files = [
            file("a.png", &[40, 20]),
            file("b.png", b"corrupt"),
            file("c.png", &[20, 40]),
        ];

        let err = pipeline
            .run(&files, RecordingAssembler::default(), &download, "images.pdf")
            .unwrap_err();

        match err {
            BildwerkError::DecodeFailure { index, name, .. } => {
                assert_eq!(index, 1);
                assert_eq!(name, "b.png");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(pipeline.state(), CommitState::Failed);
        assert!(download.saved.borrow().is_empty());
        assert_eq!(
            pipeline.transitions(),
            [
                CommitState::Decoding(0),
                CommitState::Placing(0),
                CommitState::Appending(0),
                CommitState::Decoding(1),
                CommitState::Failed,
            ]
        );
    }

    #[test]
    fn zero_sized_image_surfaces_as_decode_failure() {
        let mut pipeline = CommitPipeline::new(FakeDecoder);
        let download = MemoryDownload::default();
        let files = [file("ok.png", &[10, 10]), file("flat.png", &[10, 0])];

        let err = pipeline
            .run(&files, RecordingAssembler::default(), &download, "images.pdf")
            .unwrap_err();

        assert!(matches!(err, BildwerkError::DecodeFailure { index: 1, .. }));
        assert!(download.saved.borrow().is_empty());
    }

    #[test]
    fn success_walks_every_state_and_saves_once() {
        let mut pipeline = CommitPipeline::new(FakeDecoder);
        let download = MemoryDownload::default();
        let files = [file("a.png", &[40, 20]), file("b.png", &[20, 40])];

        let report = pipeline
            .run(&files, RecordingAssembler::default(), &download, "album.pdf")
            .expect("commit");

        assert_eq!(report.pages, 2);
        assert_eq!(report.filename, "album.pdf");
        assert_eq!(pipeline.state(), CommitState::Done);
        assert_eq!(
            pipeline.transitions(),
            [
                CommitState::Decoding(0),
                CommitState::Placing(0),
                CommitState::Appending(0),
                CommitState::Decoding(1),
                CommitState::Placing(1),
                CommitState::Appending(1),
                CommitState::Sealing,
                CommitState::Done,
            ]
        );

        let saved = download.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "album.pdf");
        assert_eq!(saved[0].1, b"pages=2");
    }

    #[test]
    fn trigger_refuses_overlapping_commits() {
        let trigger = CommitTrigger::new();
        let guard = trigger.try_begin().expect("first commit");
        assert!(trigger.is_in_flight());
        assert!(matches!(
            trigger.try_begin(),
            Err(BildwerkError::CommitInProgress)
        ));

        drop(guard);
        assert!(!trigger.is_in_flight());
        assert!(trigger.try_begin().is_ok());
    }
}
