//! Demo player configuration
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/wavecard-player/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use wavecard_core::AudioSource;
use wavecard_widgets::{AudioPlayerConfig, ControlVariant};

use crate::engine::SimulationConfig;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Widget options (source, control variant, presentation flags)
    pub playback: AudioPlayerConfig,
    /// Scripted engine parameters (decode delay, reported duration)
    pub simulation: SimulationConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        // Out of the box: a demo source with the full transport
        let playback = AudioPlayerConfig {
            source: Some(AudioSource::new("wavecard://demo-track")),
            control_variant: ControlVariant::Full,
            playable: true,
            ..AudioPlayerConfig::default()
        };
        Self {
            playback,
            simulation: SimulationConfig::default(),
        }
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/wavecard-player/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("wavecard-player")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> PlayerConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return PlayerConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<PlayerConfig>(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                PlayerConfig::default()
            }
        },
        Err(e) => {
            log::warn!(
                "load_config: Failed to read config file: {}, using defaults",
                e
            );
            PlayerConfig::default()
        }
    }
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &PlayerConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert!(config.playback.source.is_some());
        assert_eq!(config.playback.control_variant, ControlVariant::Full);
        assert!(config.playback.playable);
        assert_eq!(config.playback.skip_seconds, 5.0);
        assert_eq!(config.simulation.decode_delay_ms, 600);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PlayerConfig {
            playback: AudioPlayerConfig {
                source: Some(AudioSource::with_cover("a.mp3", "a.png")),
                control_variant: ControlVariant::PlayPause,
                inverted: true,
                compact: true,
                playable: false,
                skip_seconds: 10.0,
                content_type: Some("audio/mpeg".to_string()),
            },
            simulation: SimulationConfig {
                decode_delay_ms: 50,
                duration_seconds: 12.0,
                progress_interval_ms: 20,
            },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: PlayerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let parsed: PlayerConfig = serde_yaml::from_str("simulation:\n  decode_delay_ms: 5\n").unwrap();
        assert_eq!(parsed.simulation.decode_delay_ms, 5);
        assert_eq!(parsed.simulation.duration_seconds, 187.0);
        assert_eq!(parsed.playback.skip_seconds, 5.0);
    }
}
