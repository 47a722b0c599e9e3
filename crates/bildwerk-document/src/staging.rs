// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Staging list: the ordered buffer of images waiting to become PDF pages.
//
// Insertion order is page order. Every mutation validates before touching the
// underlying vector, so a failed call leaves the list exactly as it was.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::{MAX_STAGED_FILES, StagedId};
use tracing::{debug, info, instrument, warn};

/// One pending image source.
///
/// The payload is reference-counted, so snapshots are cheap and never copy
/// image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    id: StagedId,
    name: String,
    bytes: Arc<[u8]>,
}

impl StagedFile {
    /// Wrap an in-memory payload.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: StagedId::new(),
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it after its final path component.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let bytes = std::fs::read(path_ref)?;
        let name = path_ref
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_ref.display().to_string());
        debug!(bytes = bytes.len(), "File read for staging");
        Ok(Self::new(name, bytes))
    }

    pub fn id(&self) -> StagedId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Ordered, capacity-bounded collection of staged files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingList {
    files: Vec<StagedFile>,
}

impl StagingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `files` in order, or nothing at all.
    ///
    /// Fails with [`BildwerkError::CapacityExceeded`] when the result would
    /// hold more than [`MAX_STAGED_FILES`] entries.
    #[instrument(skip_all, fields(requested = files.len(), current = self.files.len()))]
    pub fn add(&mut self, files: Vec<StagedFile>) -> Result<()> {
        let current = self.files.len();
        if current + files.len() > MAX_STAGED_FILES {
            warn!("Staging rejected: capacity exceeded");
            return Err(BildwerkError::CapacityExceeded {
                requested: files.len(),
                current,
                max: MAX_STAGED_FILES,
            });
        }

        self.files.extend(files);
        info!(len = self.files.len(), "Files staged");
        Ok(())
    }

    /// Remove the file at `index`; later files move up one position.
    pub fn remove_at(&mut self, index: usize) -> Result<StagedFile> {
        if index >= self.files.len() {
            return Err(BildwerkError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        let removed = self.files.remove(index);
        debug!(index, id = %removed.id, len = self.files.len(), "Staged file removed");
        Ok(removed)
    }

    /// Remove the file carrying `id`, wherever it currently sits.
    pub fn remove(&mut self, id: StagedId) -> Result<StagedFile> {
        let index = self
            .position(id)
            .ok_or(BildwerkError::UnknownStagedFile(id))?;
        self.remove_at(index)
    }

    /// Current position of `id`, if still staged.
    pub fn position(&self, id: StagedId) -> Option<usize> {
        self.files.iter().position(|file| file.id == id)
    }

    /// Read-only view of the current sequence.
    pub fn snapshot(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// How many more files may be staged.
    pub fn remaining_capacity(&self) -> usize {
        MAX_STAGED_FILES - self.files.len()
    }
}

/// A staging list shared between several callers.
///
/// Every operation holds the lock for its whole duration, so mutations are
/// applied one at a time in the order they acquire it.
#[derive(Debug, Clone, Default)]
pub struct SharedStagingList {
    inner: Arc<Mutex<StagingList>>,
}

impl SharedStagingList {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the list half-mutated, so
    // a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, StagingList> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, files: Vec<StagedFile>) -> Result<()> {
        self.lock().add(files)
    }

    pub fn remove_at(&self, index: usize) -> Result<StagedFile> {
        self.lock().remove_at(index)
    }

    pub fn remove(&self, id: StagedId) -> Result<StagedFile> {
        self.lock().remove(id)
    }

    /// Owned copy of the current sequence.
    pub fn snapshot(&self) -> Vec<StagedFile> {
        self.lock().snapshot().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run `f` against the list as one atomic step.
    pub fn with<R>(&self, f: impl FnOnce(&mut StagingList) -> R) -> R {
        f(&mut self.lock())
    }
}
