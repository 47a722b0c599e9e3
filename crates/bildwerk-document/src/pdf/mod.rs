// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: assembling image PDFs and compacting existing ones.

pub mod compact;
pub mod writer;

pub use compact::PdfCompactor;
pub use writer::PdfAssembler;
