//! Types for batch conversion.

use serde::{Deserialize, Serialize};

/// A file received in an upload request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client (unsanitized; may be empty).
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// A successfully converted file as reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedFile {
    /// Sanitized name of the uploaded file.
    pub original: String,
    /// Name of the converted artifact.
    pub converted: String,
    pub download_url: String,
}

/// Terminal outcome of one file in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted(ConvertedFile),
    /// Validation, storage or encoder failure; the message is user-facing.
    Failed(String),
    /// Empty part with no filename (nothing was selected).
    Skipped,
}

/// Everything that happened to a batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<ConvertedFile>,
    pub errors: Vec<String>,
}

impl BatchResult {
    /// Appends an outcome to the matching list.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted(file) => self.results.push(file),
            FileOutcome::Failed(message) => self.errors.push(message),
            FileOutcome::Skipped => {}
        }
    }
}
