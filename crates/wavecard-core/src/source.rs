//! Audio source description and container identity
//!
//! A waveform engine instance renders into a named container. The container
//! id is derived from the source URL so that remounting the same source
//! always binds to the same container, while distinct sources get distinct
//! containers with overwhelming probability.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An audio source to be decoded and visualized by the engine
///
/// Immutable per mount: replacing the source tears the current engine
/// instance down and creates a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSource {
    /// URL (or path) of the audio content
    pub url: String,
    /// Optional cover artwork, display only
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

impl AudioSource {
    /// Create a source without cover artwork
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cover_image_url: None,
        }
    }

    /// Create a source with cover artwork
    pub fn with_cover(url: impl Into<String>, cover: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cover_image_url: Some(cover.into()),
        }
    }

    pub fn has_cover(&self) -> bool {
        self.cover_image_url.is_some()
    }
}

/// Deterministic identifier for a source URL (SHA-256, lowercase hex)
///
/// Stable across calls and processes. Used only for container binding
/// uniqueness, not as a security boundary.
pub fn source_id(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Container id an engine instance renders into
pub fn container_id(url: &str) -> String {
    format!("waveform-{}", source_id(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_stable() {
        let a = source_id("https://example.com/track.mp3");
        let b = source_id("https://example.com/track.mp3");
        assert_eq!(a, b);
    }

    #[test]
    fn test_source_id_distinct() {
        // Near-identical URLs must still produce distinct ids
        let a = source_id("https://example.com/track.mp3");
        let b = source_id("https://example.com/track.mp3?v=2");
        let c = source_id("https://example.com/Track.mp3");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_container_id_prefix() {
        let id = container_id("file:///music/loop.wav");
        assert!(id.starts_with("waveform-"));
        assert_eq!(id, format!("waveform-{}", source_id("file:///music/loop.wav")));
    }

    #[test]
    fn test_source_yaml_roundtrip() {
        let source = AudioSource::with_cover("a.mp3", "a.png");
        let yaml = serde_yaml::to_string(&source).unwrap();
        let parsed: AudioSource = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, source);

        // cover_image_url is optional in serialized form
        let bare: AudioSource = serde_yaml::from_str("url: b.mp3\n").unwrap();
        assert_eq!(bare, AudioSource::new("b.mp3"));
    }
}
