//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::{ConversionJob, ConversionOutput};
use crate::format::FormatRegistry;

/// A converter that can transcode media files.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts `job.input_path` into `job.output_path`, overwriting any
    /// existing output. Resolves once the encoder has exited.
    async fn convert(&self, job: ConversionJob) -> Result<ConversionOutput, ConverterError>;

    /// Validates that the converter is properly configured and ready.
    async fn validate(&self) -> Result<(), ConverterError>;

    /// Whether this converter can write the given output extension.
    fn supports_output(&self, extension: &str) -> bool {
        FormatRegistry::is_encodable(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::EncodeParams;
    use std::path::PathBuf;

    struct NullConverter;

    #[async_trait]
    impl Converter for NullConverter {
        fn name(&self) -> &str {
            "null"
        }

        async fn convert(&self, job: ConversionJob) -> Result<ConversionOutput, ConverterError> {
            Ok(ConversionOutput {
                output_path: job.output_path,
                output_size_bytes: 0,
                duration_ms: 0,
            })
        }

        async fn validate(&self) -> Result<(), ConverterError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_convert_returns_output_path() {
        let converter = NullConverter;
        let job = ConversionJob {
            input_path: PathBuf::from("/in/clip.avi"),
            output_path: PathBuf::from("/out/clip_converted.mp4"),
            params: EncodeParams::default(),
        };
        let output = converter.convert(job).await.unwrap();
        assert_eq!(output.output_path, PathBuf::from("/out/clip_converted.mp4"));
    }

    #[test]
    fn test_default_supported_outputs() {
        let converter = NullConverter;
        assert!(converter.supports_output("mp4"));
        assert!(converter.supports_output("JPG"));
        assert!(!converter.supports_output("midi"));
        assert!(!converter.supports_output("jpeg"));
    }
}
