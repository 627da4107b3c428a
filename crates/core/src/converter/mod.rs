//! Converter module for transcoding media files.
//!
//! This module provides the `Converter` trait and an FFmpeg implementation
//! that runs the external `ffmpeg` binary once per file, plus the
//! [`QualityPolicy`] deciding which compression parameters it receives.
//!
//! # Example
//!
//! ```ignore
//! use mediaforge_core::converter::{Converter, ConversionJob, FfmpegConverter, QualityPolicy};
//! use mediaforge_core::MediaCategory;
//!
//! let converter = FfmpegConverter::with_defaults();
//! converter.validate().await?;
//!
//! let job = ConversionJob {
//!     input_path: PathBuf::from("uploads/clip.avi"),
//!     output_path: PathBuf::from("converted/clip_converted.mp4"),
//!     params: QualityPolicy::default().params_for(Some(MediaCategory::Video), "mp4"),
//! };
//!
//! let output = converter.convert(job).await?;
//! println!("Converted in {} ms", output.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod quality;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use quality::{QualityConfig, QualityPolicy};
pub use traits::Converter;
pub use types::{AudioCodec, ConversionJob, ConversionOutput, EncodeParams, VideoCodec};
