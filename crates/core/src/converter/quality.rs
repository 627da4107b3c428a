//! Compression settings chosen per target category.

use serde::{Deserialize, Serialize};

use super::types::{AudioCodec, EncodeParams, VideoCodec};
use crate::format::MediaCategory;

/// Tunable knobs behind the quality policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Constant rate factor for video (higher = smaller files).
    #[serde(default = "default_video_crf")]
    pub video_crf: u8,

    /// x264 preset for video.
    #[serde(default = "default_video_preset")]
    pub video_preset: String,

    /// Target bitrate for audio outputs.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate_kbps: u32,

    /// Quality scale for JPEG outputs (1-31, 8-10 is visibly compressed).
    #[serde(default = "default_jpeg_qscale")]
    pub jpeg_qscale: u8,
}

fn default_video_crf() -> u8 {
    30
}

fn default_video_preset() -> String {
    "veryfast".to_string()
}

fn default_audio_bitrate() -> u32 {
    96
}

fn default_jpeg_qscale() -> u8 {
    8
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            video_crf: default_video_crf(),
            video_preset: default_video_preset(),
            audio_bitrate_kbps: default_audio_bitrate(),
            jpeg_qscale: default_jpeg_qscale(),
        }
    }
}

/// Maps a target to encoder parameters. Never fails: anything it has no
/// rule for gets the encoder defaults.
#[derive(Debug, Clone, Default)]
pub struct QualityPolicy {
    config: QualityConfig,
}

impl QualityPolicy {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Parameters for converting into `extension` of the given category.
    pub fn params_for(&self, category: Option<MediaCategory>, extension: &str) -> EncodeParams {
        match category {
            Some(MediaCategory::Video) => EncodeParams {
                video_codec: Some(VideoCodec::H264),
                preset: Some(self.config.video_preset.clone()),
                crf: Some(self.config.video_crf),
                audio_codec: Some(AudioCodec::Aac),
                strict: Some("experimental".to_string()),
                ..Default::default()
            },
            Some(MediaCategory::Audio) => EncodeParams {
                audio_bitrate_kbps: Some(self.config.audio_bitrate_kbps),
                ..Default::default()
            },
            Some(MediaCategory::Image) if is_lossy_image(extension) => EncodeParams {
                qscale: Some(self.config.jpeg_qscale),
                ..Default::default()
            },
            // Lossless images and anything unmapped
            _ => EncodeParams::default(),
        }
    }
}

fn is_lossy_image(extension: &str) -> bool {
    matches!(extension.to_ascii_lowercase().as_str(), "jpg" | "jpeg")
}
