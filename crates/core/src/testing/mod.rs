//! Testing utilities and mock implementations.
//!
//! [`MockConverter`] stands in for the ffmpeg-backed converter so batch and
//! HTTP tests run without an encoder installed.

mod mock_converter;

pub use mock_converter::{MockConverter, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;

    use crate::config::{Config, StorageConfig};

    /// A config whose storage lives under `root`.
    pub fn config_in(root: &Path) -> Config {
        Config {
            storage: StorageConfig {
                upload_dir: root.join("uploads"),
                converted_dir: root.join("converted"),
            },
            ..Default::default()
        }
    }

    /// `len` bytes of filler content.
    pub fn payload(len: usize) -> Vec<u8> {
        vec![0xAB; len]
    }
}
