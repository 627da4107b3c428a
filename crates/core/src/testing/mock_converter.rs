//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::converter::{ConversionJob, ConversionOutput, Converter, ConverterError};

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the input file existed when the encoder was invoked.
    pub input_existed: bool,
    /// Other files sitting next to the input when the encoder was invoked.
    pub other_inputs: Vec<String>,
    /// Whether the conversion succeeded.
    pub success: bool,
    pub started_at: Instant,
    pub finished_at: Instant,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion jobs for assertions
/// - Simulate encoder failures, per input file or for the next call
/// - Write a small output file so downloads can be exercised
///
/// Clones share state, so a test can keep a handle after passing one to
/// the code under test.
///
/// # Example
///
/// ```rust,ignore
/// use mediaforge_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.fail_with_stderr("broken.mp4", "moov atom not found").await;
///
/// let batch = BatchConverter::from_config(Arc::new(converter.clone()), &config);
/// let result = batch.process(&target, files).await;
///
/// assert_eq!(converter.conversion_count().await, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Stderr to report, keyed by input file name.
    failures: Arc<RwLock<HashMap<String, String>>>,
    /// If set, the next conversion will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Bytes written to every successful output.
    output_content: Arc<RwLock<Vec<u8>>>,
    /// Simulated conversion duration.
    conversion_duration: Arc<RwLock<Duration>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
            output_content: Arc::new(RwLock::new(b"converted".to_vec())),
            conversion_duration: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Make conversions of the named input fail with the given stderr.
    pub async fn fail_with_stderr(&self, input_name: &str, stderr: &str) {
        self.failures
            .write()
            .await
            .insert(input_name.to_string(), stderr.to_string());
    }

    /// Configure the next conversion to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the bytes written to successful outputs.
    pub async fn set_output_content(&self, content: impl Into<Vec<u8>>) {
        *self.output_content.write().await = content.into();
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration.write().await = duration;
    }

    async fn record(&self, job: ConversionJob, seen: InputSnapshot, success: bool) {
        self.conversions.write().await.push(RecordedConversion {
            job,
            input_existed: seen.input_existed,
            other_inputs: seen.other_inputs,
            success,
            started_at: seen.started_at,
            finished_at: Instant::now(),
        });
    }

    async fn outcome(&self, job: &ConversionJob) -> Result<(), ConverterError> {
        let extension = job.output_extension().unwrap_or_default();
        if !self.supports_output(&extension) {
            return Err(ConverterError::UnsupportedOutputFormat { format: extension });
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let input_name = job
            .input_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if let Some(stderr) = self.failures.read().await.get(input_name) {
            return Err(ConverterError::conversion_failed(
                "FFmpeg exited with code: Some(1)",
                Some(stderr.clone()),
            ));
        }

        Ok(())
    }
}

/// What the input directory looked like when a conversion started.
struct InputSnapshot {
    input_existed: bool,
    other_inputs: Vec<String>,
    started_at: Instant,
}

impl InputSnapshot {
    async fn take(input_path: &Path) -> Self {
        let started_at = Instant::now();
        let input_existed = tokio::fs::try_exists(input_path).await.unwrap_or(false);

        let mut other_inputs = Vec::new();
        if let Some(dir) = input_path.parent() {
            if let Ok(mut entries) = tokio::fs::read_dir(dir).await {
                while let Ok(Some(entry)) = entries.next_entry().await {
                    if entry.path() != input_path {
                        other_inputs.push(entry.file_name().to_string_lossy().into_owned());
                    }
                }
            }
        }
        other_inputs.sort();

        Self {
            input_existed,
            other_inputs,
            started_at,
        }
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionOutput, ConverterError> {
        let seen = InputSnapshot::take(&job.input_path).await;

        let duration = *self.conversion_duration.read().await;
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }

        if let Err(e) = self.outcome(&job).await {
            self.record(job, seen, false).await;
            return Err(e);
        }

        let content = self.output_content.read().await.clone();
        if let Some(parent) = job.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&job.output_path, &content).await?;

        let output = ConversionOutput {
            output_path: job.output_path.clone(),
            output_size_bytes: content.len() as u64,
            duration_ms: duration.as_millis() as u64,
        };
        self.record(job, seen, true).await;
        Ok(output)
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        Ok(())
    }
}
