//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The encoder cannot produce this output format.
    #[error("Output format {format} is not supported by the encoder")]
    UnsupportedOutputFormat { format: String },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    /// Conversion process failed.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Conversion timed out.
    #[error("Conversion timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a new conversion failed error with stderr output.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Whether the encoder itself reported the failure, as opposed to an
    /// environment or I/O problem around it.
    pub fn is_encoder_failure(&self) -> bool {
        matches!(
            self,
            Self::ConversionFailed { .. }
                | Self::UnsupportedOutputFormat { .. }
                | Self::Timeout { .. }
        )
    }

    /// Diagnostic text for an encoder failure.
    ///
    /// For a failed run this is the captured error stream; `None` when the
    /// encoder wrote nothing useful.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::ConversionFailed { stderr, .. } => stderr
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            Self::UnsupportedOutputFormat { .. } | Self::Timeout { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}
