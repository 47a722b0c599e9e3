// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-document: Document processing for the Bildwerk toolbox.
//
// Provides the image-to-PDF core (staging list, preview projection, page
// layout, commit pipeline), PDF assembly and compaction, image decoding and
// re-encoding, and the single-file conversion tools.

pub mod commit;
pub mod convert;
pub mod download;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod preview;
pub mod session;
pub mod staging;
pub mod traits;

// Re-export the primary structs so callers can use `bildwerk_document::StagingList` etc.
pub use commit::{CommitPipeline, CommitReport, CommitState, CommitTrigger};
pub use convert::{DocumentConverter, ToolOutput};
pub use download::DirectoryDownload;
pub use crate::image::decoder::{DecodedImage, RasterDecoder};
pub use crate::image::processor::ImageProcessor;
pub use layout::{ImageDimensions, PageLayoutEngine, Placement};
pub use pdf::compact::PdfCompactor;
pub use pdf::writer::PdfAssembler;
pub use preview::{PreviewEntry, PreviewRenderer, RemovalHandle};
pub use session::ImageToPdfSession;
pub use staging::{SharedStagingList, StagedFile, StagingList};
pub use traits::{DocumentAssembler, DownloadTrigger, ImageDecoder};
