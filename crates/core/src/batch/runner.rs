//! Sequential per-file conversion of an upload batch.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::types::{BatchResult, ConvertedFile, FileOutcome, UploadedFile};
use crate::config::Config;
use crate::converter::{ConversionJob, Converter, ConverterError, QualityPolicy};
use crate::format::MediaCategory;
use crate::metrics::{BATCH_SIZE, CONVERSIONS_TOTAL, CONVERSION_DURATION};
use crate::storage::{converted_filename, sanitize_filename, RequestDir, StorageError, StorageLayout};
use crate::validator::{FileRejection, TargetFormat, Validator};

/// Route prefix under which converted files are downloaded.
pub const DOWNLOAD_ROUTE_PREFIX: &str = "/download/";

/// Encoder diagnostics are cut to this many characters.
const MAX_DIAGNOSTIC_CHARS: usize = 100;

const UNKNOWN_ENCODER_ERROR: &str = "Unknown ffmpeg error.";

/// Runs the validate/save/convert/cleanup workflow for each file of a batch.
pub struct BatchConverter {
    converter: Arc<dyn Converter>,
    validator: Validator,
    policy: QualityPolicy,
    storage: StorageLayout,
}

impl BatchConverter {
    pub fn new(
        converter: Arc<dyn Converter>,
        validator: Validator,
        policy: QualityPolicy,
        storage: StorageLayout,
    ) -> Self {
        Self {
            converter,
            validator,
            policy,
            storage,
        }
    }

    /// Builds a batch converter from the service configuration.
    pub fn from_config(converter: Arc<dyn Converter>, config: &Config) -> Self {
        Self::new(
            converter,
            Validator::new(&config.limits),
            QualityPolicy::new(config.quality.clone()),
            StorageLayout::new(&config.storage),
        )
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn storage(&self) -> &StorageLayout {
        &self.storage
    }

    /// Processes every file in order. One file's failure never stops the
    /// batch; every outcome lands in the returned result.
    pub async fn process(&self, target: &TargetFormat, files: Vec<UploadedFile>) -> BatchResult {
        BATCH_SIZE.observe(files.len() as f64);
        info!(
            files = files.len(),
            format = target.extension(),
            "Processing upload batch"
        );

        let request_dir = self.storage.create_request_dir().await;
        if let Err(ref e) = request_dir {
            warn!(error = %e, "Failed to create request directory");
        }

        let mut result = BatchResult::default();
        for file in files {
            let outcome = self.process_file(&request_dir, target, file).await;
            result.record(outcome);
        }

        if let Ok(dir) = request_dir {
            dir.remove().await;
        }

        info!(
            converted = result.results.len(),
            failed = result.errors.len(),
            "Upload batch finished"
        );
        result
    }

    async fn process_file(
        &self,
        request_dir: &Result<RequestDir, StorageError>,
        target: &TargetFormat,
        file: UploadedFile,
    ) -> FileOutcome {
        if file.filename.is_empty() {
            return FileOutcome::Skipped;
        }

        let filename = sanitize_filename(&file.filename);

        let category = match self.validator.check_file(&filename, target) {
            Ok(category) => category,
            Err(rejection) => return self.reject(target.category(), rejection),
        };

        let input_path = match request_dir {
            Ok(dir) => dir.input_path(&filename),
            Err(e) => {
                return self.reject(
                    category,
                    FileRejection::StorageFailed {
                        filename,
                        reason: e.to_string(),
                    },
                )
            }
        };

        let outcome = self
            .convert_persisted(&filename, category, &input_path, &file.content, target)
            .await;

        // Single cleanup point for every exit path of the persisted file
        StorageLayout::discard(&input_path).await;

        outcome
    }

    /// Saves, size-checks and converts one file. The caller removes the
    /// temp input afterwards.
    async fn convert_persisted(
        &self,
        filename: &str,
        category: MediaCategory,
        input_path: &Path,
        content: &[u8],
        target: &TargetFormat,
    ) -> FileOutcome {
        // Save first: the size decision is made on what actually hit the disk
        let size = match StorageLayout::save_upload(input_path, content).await {
            Ok(size) => size,
            Err(e) => {
                return self.reject(
                    category,
                    FileRejection::StorageFailed {
                        filename: filename.to_string(),
                        reason: e.to_string(),
                    },
                )
            }
        };

        if let Err(rejection) = self.validator.check_size(filename, size) {
            return self.reject(category, rejection);
        }

        let converted = converted_filename(filename, target.extension());
        let job = ConversionJob {
            input_path: input_path.to_path_buf(),
            output_path: self.storage.converted_path(&converted),
            params: self
                .policy
                .params_for(Some(target.category()), target.extension()),
        };

        let timer = CONVERSION_DURATION
            .with_label_values(&[category.as_str()])
            .start_timer();
        let result = self.converter.convert(job).await;
        timer.observe_duration();

        match result {
            Ok(output) => {
                CONVERSIONS_TOTAL
                    .with_label_values(&[category.as_str(), "success"])
                    .inc();
                info!(
                    file = filename,
                    converted = %converted,
                    size_bytes = output.output_size_bytes,
                    duration_ms = output.duration_ms,
                    "File converted"
                );
                FileOutcome::Converted(ConvertedFile {
                    original: filename.to_string(),
                    download_url: download_url(&converted),
                    converted,
                })
            }
            Err(e) => self.conversion_failed(filename, category, e),
        }
    }

    fn conversion_failed(
        &self,
        filename: &str,
        category: MediaCategory,
        error: ConverterError,
    ) -> FileOutcome {
        if error.is_encoder_failure() {
            CONVERSIONS_TOTAL
                .with_label_values(&[category.as_str(), "encoder_error"])
                .inc();
            warn!(file = filename, error = %error, "Encoder failed");
            let diagnostic = error
                .diagnostic()
                .unwrap_or_else(|| UNKNOWN_ENCODER_ERROR.to_string());
            FileOutcome::Failed(format!(
                "Conversion error for \"{}\": {}...",
                filename,
                truncate_chars(&diagnostic, MAX_DIAGNOSTIC_CHARS)
            ))
        } else {
            CONVERSIONS_TOTAL
                .with_label_values(&[category.as_str(), "internal_error"])
                .inc();
            warn!(file = filename, error = %error, "Unexpected conversion error");
            FileOutcome::Failed(format!(
                "Unexpected error while processing \"{}\": {}",
                filename, error
            ))
        }
    }

    fn reject(&self, category: MediaCategory, rejection: FileRejection) -> FileOutcome {
        CONVERSIONS_TOTAL
            .with_label_values(&[category.as_str(), "rejected"])
            .inc();
        warn!(reason = %rejection, "File rejected");
        FileOutcome::Failed(rejection.to_string())
    }
}

/// Download link for a converted artifact.
pub fn download_url(converted: &str) -> String {
    format!("{}{}", DOWNLOAD_ROUTE_PREFIX, urlencoding::encode(converted))
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
