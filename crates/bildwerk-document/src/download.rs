// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Download trigger that writes finished files into a directory.

use std::io;
use std::path::{Path, PathBuf};

use bildwerk_core::error::Result;
use tracing::{info, instrument};

use crate::traits::DownloadTrigger;

/// Saves outputs into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadTrigger for DirectoryDownload {
    /// Only the final component of `filename` is used, so a name such as
    /// `../x.pdf` cannot escape the output directory.
    #[instrument(skip(self, bytes), fields(dir = %self.dir.display(), bytes_len = bytes.len()))]
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = Path::new(filename).file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a usable file name: {filename:?}"),
            )
        })?;

        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(name);
        std::fs::write(&target, bytes)?;

        info!("Wrote {}", target.display());
        Ok(target)
    }
}
