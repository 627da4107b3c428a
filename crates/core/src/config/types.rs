use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::converter::{ConverterConfig, QualityConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Where uploads are staged and converted files are kept.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Temporary storage for uploaded inputs.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Converted artifacts served by the download endpoint.
    #[serde(default = "default_converted_dir")]
    pub converted_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            converted_dir: default_converted_dir(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_converted_dir() -> PathBuf {
    PathBuf::from("converted")
}

/// Size ceilings applied to uploads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Per-file ceiling, checked after the file is written (default: 10 MiB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// Whole request body ceiling (default: 50 MiB).
    #[serde(default = "default_max_request_size")]
    pub max_request_size_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            max_request_size_bytes: default_max_request_size(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_max_request_size() -> u64 {
    50 * 1024 * 1024
}

/// Retention policy for converted artifacts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetentionConfig {
    /// Whether the background sweeper runs at all.
    #[serde(default = "default_retention_enabled")]
    pub enabled: bool,
    /// Converted files older than this are deleted (default: 24 hours).
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,
    /// How often the sweeper wakes up (default: 10 minutes).
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: default_retention_enabled(),
            max_age_secs: default_max_age(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_retention_enabled() -> bool {
    true
}

fn default_max_age() -> u64 {
    24 * 60 * 60
}

fn default_sweep_interval() -> u64 {
    600
}

/// Sanitized config for API responses (filesystem paths hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
    pub converter: SanitizedConverterConfig,
    pub quality: QualityConfig,
    pub retention: RetentionConfig,
    pub target_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConverterConfig {
    pub ffmpeg_log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub extra_args_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            limits: config.limits.clone(),
            converter: SanitizedConverterConfig {
                ffmpeg_log_level: config.converter.ffmpeg_log_level.clone(),
                timeout_secs: config.converter.timeout_secs,
                extra_args_configured: !config.converter.extra_ffmpeg_args.is_empty(),
            },
            quality: config.quality.clone(),
            retention: config.retention.clone(),
            target_formats: crate::format::FormatRegistry::target_extensions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
