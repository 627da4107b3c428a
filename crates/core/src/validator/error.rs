//! Validation errors. The `Display` strings are shown to users verbatim.

use thiserror::Error;

use crate::format::MediaCategory;

/// Rejects a whole upload request before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("No target format selected or unsupported target format.")]
    InvalidTargetFormat,

    #[error("No files selected.")]
    NoFiles,
}

/// Rejects a single file; the rest of the batch still runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("File \"{filename}\" has a disallowed extension.")]
    DisallowedExtension { filename: String },

    #[error("Cannot convert \"{filename}\" ({input}) to a {target} format ({format}).")]
    CategoryMismatch {
        filename: String,
        input: MediaCategory,
        target: MediaCategory,
        format: String,
    },

    #[error("File \"{filename}\" is too large (limit {limit}).")]
    TooLarge { filename: String, limit: String },

    #[error("Error while saving or checking size of \"{filename}\": {reason}")]
    StorageFailed { filename: String, reason: String },
}
