//! Error types for local file handling.

use thiserror::Error;

/// Errors raised while inspecting an uploaded file or producing a
/// template. All of these block the upload step and are shown to the
/// operator verbatim.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file does not carry a supported extension.
    #[error("'{name}' is not a CSV file; please upload a CSV file using the provided template")]
    UnsupportedExtension { name: String },

    /// The file has no content at all.
    #[error("the uploaded file is empty")]
    EmptyFile,

    /// The header row could not be parsed.
    #[error("could not read the file's header row: {reason}")]
    MalformedHeader { reason: String },

    /// Writing the sample template failed.
    #[error("failed to generate template: {source}")]
    Template {
        #[from]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
