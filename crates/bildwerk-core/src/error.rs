// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildwerk.

use thiserror::Error;

use crate::types::StagedId;

/// Top-level error type for all Bildwerk operations.
#[derive(Debug, Error)]
pub enum BildwerkError {
    // -- Staging errors --
    #[error("cannot stage {requested} more file(s): {current} of {max} slots already used")]
    CapacityExceeded {
        requested: usize,
        current: usize,
        max: usize,
    },

    #[error("index {index} out of range for staging list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("staged file {0} is no longer in the staging list")]
    UnknownStagedFile(StagedId),

    // -- Commit pipeline errors --
    #[error("nothing to commit: the staging list is empty")]
    EmptyInput,

    #[error("file #{index} ({name}) could not be decoded: {reason}")]
    DecodeFailure {
        index: usize,
        name: String,
        reason: String,
    },

    #[error("invalid image dimensions {width}x{height}")]
    InvalidImageDimensions { width: f64, height: f64 },

    #[error("invalid page size {width}x{height}")]
    InvalidPageSize { width: f64, height: f64 },

    #[error("a commit is already in progress")]
    CommitInProgress,

    // -- Encoding errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- I/O and configuration --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildwerkError>;
