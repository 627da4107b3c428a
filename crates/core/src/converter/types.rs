//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Video codec selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCodec {
    /// H.264 / AVC
    H264,
}

impl VideoCodec {
    /// Returns the ffmpeg codec name for this codec.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::H264 => "libx264",
        }
    }
}

/// Audio codec selection for the audio stream of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCodec {
    /// Advanced Audio Coding
    Aac,
}

impl AudioCodec {
    /// Returns the ffmpeg codec name for this codec.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Aac => "aac",
        }
    }
}

/// Encoder parameters for one conversion.
///
/// Every field is optional; an empty set leaves all choices to the encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeParams {
    pub video_codec: Option<VideoCodec>,
    /// Encoder speed/compression preset (e.g. "veryfast").
    pub preset: Option<String>,
    /// Constant rate factor; higher means more compression.
    pub crf: Option<u8>,
    pub audio_codec: Option<AudioCodec>,
    pub audio_bitrate_kbps: Option<u32>,
    /// Fixed quality scale for lossy image encoders (1 best, 31 worst).
    pub qscale: Option<u8>,
    /// Standards compliance level (e.g. "experimental").
    pub strict: Option<String>,
}

impl EncodeParams {
    /// Whether no parameter is set.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Renders the parameters as ffmpeg output options.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(codec) = self.video_codec {
            args.extend(["-c:v".to_string(), codec.ffmpeg_codec().to_string()]);
        }
        if let Some(ref preset) = self.preset {
            args.extend(["-preset".to_string(), preset.clone()]);
        }
        if let Some(crf) = self.crf {
            args.extend(["-crf".to_string(), crf.to_string()]);
        }
        if let Some(codec) = self.audio_codec {
            args.extend(["-c:a".to_string(), codec.ffmpeg_codec().to_string()]);
        }
        if let Some(bitrate) = self.audio_bitrate_kbps {
            args.extend(["-b:a".to_string(), format!("{}k", bitrate)]);
        }
        if let Some(q) = self.qscale {
            args.extend(["-q:v".to_string(), q.to_string()]);
        }
        if let Some(ref strict) = self.strict {
            args.extend(["-strict".to_string(), strict.clone()]);
        }

        args
    }
}

/// A single conversion: one input, one output, one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub params: EncodeParams,
}

impl ConversionJob {
    /// Lowercased extension of the output path, if any.
    pub fn output_extension(&self) -> Option<String> {
        self.output_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub output_path: PathBuf,
    pub output_size_bytes: u64,
    /// Wall time spent in the encoder.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_render_nothing() {
        let params = EncodeParams::default();
        assert!(params.is_default());
        assert!(params.to_ffmpeg_args().is_empty());
    }

    #[test]
    fn test_video_params_render_in_order() {
        let params = EncodeParams {
            video_codec: Some(VideoCodec::H264),
            preset: Some("veryfast".to_string()),
            crf: Some(30),
            audio_codec: Some(AudioCodec::Aac),
            strict: Some("experimental".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.to_ffmpeg_args(),
            vec![
                "-c:v", "libx264", "-preset", "veryfast", "-crf", "30", "-c:a", "aac",
                "-strict", "experimental",
            ]
        );
    }

    #[test]
    fn test_output_extension() {
        let job = ConversionJob {
            input_path: PathBuf::from("/in/a.wav"),
            output_path: PathBuf::from("/out/a_converted.MP3"),
            params: EncodeParams::default(),
        };
        assert_eq!(job.output_extension(), Some("mp3".to_string()));
    }
}
