//! Upload validation.
//!
//! Two levels of checks:
//! - request level ([`Validator::check_request`]): the shared target format
//!   and the presence of files. A failure rejects the whole batch.
//! - file level ([`Validator::check_file`], [`Validator::check_size`]): a
//!   failure is recorded for that file and the batch carries on.

mod error;

pub use error::{FileRejection, RequestError};

use serde::Serialize;

use crate::config::LimitsConfig;
use crate::format::{FormatRegistry, MediaCategory};

/// A validated conversion target shared by every file in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetFormat {
    extension: String,
    category: MediaCategory,
}

impl TargetFormat {
    /// Parses a client-supplied target format.
    pub fn parse(raw: &str) -> Option<Self> {
        let extension = raw.to_ascii_lowercase();
        if !FormatRegistry::is_allowed_target(&extension) {
            return None;
        }
        let category = FormatRegistry::category_of(&extension)?;
        Some(Self {
            extension,
            category,
        })
    }

    /// Lowercased target extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn category(&self) -> MediaCategory {
        self.category
    }
}

/// Applies the upload rules.
#[derive(Debug, Clone)]
pub struct Validator {
    max_file_size_bytes: u64,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl Validator {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            max_file_size_bytes: limits.max_file_size_bytes,
        }
    }

    /// Request-level checks, target format first.
    pub fn check_request(
        &self,
        format: Option<&str>,
        file_count: usize,
    ) -> Result<TargetFormat, RequestError> {
        let target = format
            .and_then(TargetFormat::parse)
            .ok_or(RequestError::InvalidTargetFormat)?;

        if file_count == 0 {
            return Err(RequestError::NoFiles);
        }

        Ok(target)
    }

    /// Extension and category checks for one (already sanitized) filename.
    ///
    /// Returns the input's category on success.
    pub fn check_file(
        &self,
        filename: &str,
        target: &TargetFormat,
    ) -> Result<MediaCategory, FileRejection> {
        let input_category = FormatRegistry::extension_of(filename)
            .and_then(|ext| FormatRegistry::category_of(&ext))
            .ok_or_else(|| FileRejection::DisallowedExtension {
                filename: filename.to_string(),
            })?;

        if input_category != target.category() {
            return Err(FileRejection::CategoryMismatch {
                filename: filename.to_string(),
                input: input_category,
                target: target.category(),
                format: target.extension().to_string(),
            });
        }

        Ok(input_category)
    }

    /// Size check against the on-disk size of a persisted upload.
    pub fn check_size(&self, filename: &str, size_bytes: u64) -> Result<(), FileRejection> {
        if size_bytes > self.max_file_size_bytes {
            return Err(FileRejection::TooLarge {
                filename: filename.to_string(),
                limit: format_limit(self.max_file_size_bytes),
            });
        }
        Ok(())
    }
}

/// Human-readable size limit ("10MB", "512KB", "1000 bytes").
fn format_limit(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}
