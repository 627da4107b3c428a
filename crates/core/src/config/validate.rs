use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Per-file ceiling is non-zero and fits inside the request ceiling
/// - Upload and converted directories differ
/// - Retention sweep interval is non-zero when retention is enabled
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Limits validation
    if config.limits.max_file_size_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_file_size_bytes cannot be 0".to_string(),
        ));
    }
    if config.limits.max_file_size_bytes > config.limits.max_request_size_bytes {
        return Err(ConfigError::ValidationError(format!(
            "limits.max_file_size_bytes ({}) exceeds limits.max_request_size_bytes ({})",
            config.limits.max_file_size_bytes, config.limits.max_request_size_bytes
        )));
    }

    // Storage validation
    if config.storage.upload_dir == config.storage.converted_dir {
        return Err(ConfigError::ValidationError(
            "storage.upload_dir and storage.converted_dir must differ".to_string(),
        ));
    }

    // Retention validation
    if config.retention.enabled && config.retention.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "retention.sweep_interval_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
