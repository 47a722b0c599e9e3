// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: decoding for the commit pipeline plus thumbnailing and
// JPEG/PNG re-encoding.

pub mod decoder;
pub mod processor;

pub use decoder::{DecodedImage, RasterDecoder};
pub use processor::ImageProcessor;
