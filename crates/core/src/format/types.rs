//! Media categories and the extension registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad kind of media a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    Image,
    Video,
    Audio,
}

impl MediaCategory {
    /// Returns the lowercase name used in messages and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["flv", "mov", "mp4", "avi"];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "3gp", "midi"];

/// Formats offered as conversion targets. `jpeg` is input-only.
const TARGET_EXTENSIONS: &[&str] = &[
    "jpg", "png", "bmp", // Image
    "mp4", "avi", "mov", "flv", // Video
    "mp3", "wav", "3gp", "midi", // Audio
];

/// Targets the encoder cannot produce even though they can be requested.
const UNENCODABLE_TARGETS: &[&str] = &["midi"];

/// Read-only lookup over the supported extensions.
///
/// All lookups are case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRegistry;

impl FormatRegistry {
    /// Returns the category of an extension, or `None` if it is unknown.
    pub fn category_of(extension: &str) -> Option<MediaCategory> {
        let ext = extension.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaCategory::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaCategory::Video)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaCategory::Audio)
        } else {
            None
        }
    }

    /// Whether uploads with this extension are accepted.
    pub fn is_allowed_input(extension: &str) -> bool {
        Self::category_of(extension).is_some()
    }

    /// Whether this extension may be requested as a conversion target.
    pub fn is_allowed_target(extension: &str) -> bool {
        TARGET_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
    }

    /// Whether the encoder is able to write this target format.
    pub fn is_encodable(extension: &str) -> bool {
        let ext = extension.to_ascii_lowercase();
        Self::is_allowed_target(&ext) && !UNENCODABLE_TARGETS.contains(&ext.as_str())
    }

    /// Extracts the lowercased extension (text after the last dot).
    pub fn extension_of(filename: &str) -> Option<String> {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// All accepted input extensions.
    pub fn input_extensions() -> impl Iterator<Item = &'static str> {
        IMAGE_EXTENSIONS
            .iter()
            .chain(VIDEO_EXTENSIONS)
            .chain(AUDIO_EXTENSIONS)
            .copied()
    }

    /// All accepted target extensions.
    pub fn target_extensions() -> &'static [&'static str] {
        TARGET_EXTENSIONS
    }

    /// MIME type served with a converted file of this extension.
    pub fn content_type(extension: &str) -> &'static str {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "bmp" => "image/bmp",
            "mp4" => "video/mp4",
            "avi" => "video/x-msvideo",
            "mov" => "video/quicktime",
            "flv" => "video/x-flv",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "3gp" => "audio/3gpp",
            "midi" => "audio/midi",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(FormatRegistry::category_of("png"), Some(MediaCategory::Image));
        assert_eq!(FormatRegistry::category_of("jpeg"), Some(MediaCategory::Image));
        assert_eq!(FormatRegistry::category_of("mov"), Some(MediaCategory::Video));
        assert_eq!(FormatRegistry::category_of("3gp"), Some(MediaCategory::Audio));
        assert_eq!(FormatRegistry::category_of("mkv"), None);
    }

    #[test]
    fn test_category_lookup_is_case_insensitive() {
        assert_eq!(FormatRegistry::category_of("PNG"), Some(MediaCategory::Image));
        assert_eq!(FormatRegistry::category_of("Mp4"), Some(MediaCategory::Video));
        assert!(FormatRegistry::is_allowed_target("WAV"));
    }

    #[test]
    fn test_categories_are_disjoint() {
        for ext in FormatRegistry::input_extensions() {
            let hits = [IMAGE_EXTENSIONS, VIDEO_EXTENSIONS, AUDIO_EXTENSIONS]
                .iter()
                .filter(|set| set.contains(&ext))
                .count();
            assert_eq!(hits, 1, "{} belongs to {} categories", ext, hits);
        }
    }

    #[test]
    fn test_jpeg_is_input_only() {
        assert!(FormatRegistry::is_allowed_input("jpeg"));
        assert!(!FormatRegistry::is_allowed_target("jpeg"));
    }

    #[test]
    fn test_every_target_has_a_category() {
        for ext in FormatRegistry::target_extensions() {
            assert!(FormatRegistry::category_of(ext).is_some(), "{}", ext);
        }
    }

    #[test]
    fn test_midi_is_not_encodable() {
        assert!(FormatRegistry::is_allowed_target("midi"));
        assert!(!FormatRegistry::is_encodable("midi"));
        assert!(FormatRegistry::is_encodable("mp3"));
        assert!(!FormatRegistry::is_encodable("mkv"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(FormatRegistry::extension_of("photo.PNG"), Some("png".to_string()));
        assert_eq!(
            FormatRegistry::extension_of("archive.tar.gz"),
            Some("gz".to_string())
        );
        assert_eq!(FormatRegistry::extension_of("README"), None);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(FormatRegistry::content_type("jpg"), "image/jpeg");
        assert_eq!(FormatRegistry::content_type("MP3"), "audio/mpeg");
        assert_eq!(
            FormatRegistry::content_type("xyz"),
            "application/octet-stream"
        );
    }
}
