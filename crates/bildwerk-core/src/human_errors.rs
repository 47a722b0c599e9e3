// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error notices.
//
// Every technical error is mapped to a plain-English notice with a clear
// suggestion. The severity drives how the notice is presented.

use crate::error::BildwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must change their input (too many files, nothing staged, bad file).
    ActionRequired,
    /// Cannot be fixed by the user: unreadable file, broken document.
    Permanent,
    /// A bug in Bildwerk itself; should never be seen in correct operation.
    Internal,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `BildwerkError` into a `HumanError`.
pub fn humanize_error(err: &BildwerkError) -> HumanError {
    match err {
        BildwerkError::CapacityExceeded { current, max, .. } => HumanError {
            message: format!("Maximum {max} images allowed!"),
            suggestion: format!(
                "{current} image(s) are already staged. Remove some, or create the PDF in several parts."
            ),
            severity: Severity::ActionRequired,
        },

        BildwerkError::EmptyInput => HumanError {
            message: "Upload images first!".into(),
            suggestion: "Add at least one image before creating the PDF.".into(),
            severity: Severity::ActionRequired,
        },

        BildwerkError::DecodeFailure { index, name, .. } => HumanError {
            message: format!("Image #{} ({name}) couldn't be read.", index + 1),
            suggestion: "The file may be damaged or in an unusual format. Remove it, or save it as a JPEG or PNG first. No PDF was created.".into(),
            severity: Severity::ActionRequired,
        },

        BildwerkError::InvalidImageDimensions { .. } | BildwerkError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            severity: Severity::Permanent,
        },

        BildwerkError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged. Try opening it in a PDF viewer first to check it works, or try a different file.".into(),
            severity: Severity::Permanent,
        },

        BildwerkError::CommitInProgress => HumanError {
            message: "A PDF is already being created.".into(),
            suggestion: "Wait for it to finish, then try again.".into(),
            severity: Severity::ActionRequired,
        },

        BildwerkError::Config(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Check that it is valid JSON, or remove it to use the defaults.".into(),
            severity: Severity::ActionRequired,
        },

        BildwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Bildwerk doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or choose a different output folder.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your storage may be full.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        BildwerkError::IndexOutOfRange { .. }
        | BildwerkError::UnknownStagedFile(_)
        | BildwerkError::InvalidPageSize { .. } => HumanError {
            message: "Something went wrong inside Bildwerk.".into(),
            suggestion: format!("Please report this problem. ({err})"),
            severity: Severity::Internal,
        },
    }
}
