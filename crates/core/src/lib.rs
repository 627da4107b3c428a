pub mod batch;
pub mod config;
pub mod converter;
pub mod format;
pub mod metrics;
pub mod storage;
pub mod testing;
pub mod validator;

pub use batch::{download_url, BatchConverter, BatchResult, ConvertedFile, FileOutcome, UploadedFile};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, LimitsConfig, RetentionConfig, SanitizedConfig, ServerConfig, StorageConfig,
};
pub use converter::{
    ConversionJob, ConversionOutput, Converter, ConverterConfig, ConverterError, EncodeParams,
    FfmpegConverter, QualityConfig, QualityPolicy,
};
pub use format::{FormatRegistry, MediaCategory};
pub use storage::{sanitize_filename, RetentionSweeper, StorageError, StorageLayout};
pub use validator::{FileRejection, RequestError, TargetFormat, Validator};
