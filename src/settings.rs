//! Simulation settings
//!
//! Loaded from a JSON file next to the binary; missing or broken files fall
//! back to defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_MAX_SPEED, MAX_FRAME_DT, MAX_SUBSTEPS};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        };
        f.write_str(label)
    }
}

/// Case-insensitive, as typed on the command line
impl FromStr for QualityPreset {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("low") {
            Ok(QualityPreset::Low)
        } else if s.eq_ignore_ascii_case("medium") || s.eq_ignore_ascii_case("med") {
            Ok(QualityPreset::Medium)
        } else if s.eq_ignore_ascii_case("high") {
            Ok(QualityPreset::High)
        } else {
            Err(SettingsError::UnknownQuality(s.to_owned()))
        }
    }
}

impl QualityPreset {
    /// Most lights uploaded to the renderer per frame
    pub fn max_lights(&self) -> usize {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 32,
            QualityPreset::High => 128,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown quality preset {0:?} (expected low, medium or high)")]
    UnknownQuality(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lighting quality
    pub quality: QualityPreset,

    // === Simulation ===
    /// Fixed ticks per second
    pub tick_rate: u32,
    /// Max fixed ticks per rendered frame
    pub max_substeps: u32,
    /// Frame deltas are clamped to this many seconds
    pub max_frame_dt: f64,
    /// Max speed for rigidbodies spawned without one
    pub default_max_speed: f64,

    // === Demo scene ===
    pub demo_seed: u64,
    pub demo_bodies: usize,
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            tick_rate: 60,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
            default_max_speed: DEFAULT_MAX_SPEED,

            demo_seed: 0x5EED,
            demo_bodies: 12,
            demo_frames: 600,
        }
    }
}

impl Settings {
    /// Fixed timestep in seconds
    pub fn sim_dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }

    /// Light budget for the current quality
    pub fn max_lights(&self) -> usize {
        self.quality.max_lights()
    }

    /// Load settings, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!((settings.sim_dt() - crate::consts::SIM_DT).abs() < 1e-12);
        assert_eq!(settings.max_lights(), 32);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "High", "tick_rate": 120 }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert!((settings.sim_dt() - 1.0 / 120.0).abs() < 1e-12);
        assert_eq!(settings.max_substeps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_zero_tick_rate_does_not_divide_by_zero() {
        let settings = Settings {
            tick_rate: 0,
            ..Default::default()
        };
        assert_eq!(settings.sim_dt(), 1.0);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("lumen-sim-missing-settings.json");
        let _ = fs::remove_file(&path);
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("lumen-sim-settings-{}.json", std::process::id()));
        let settings = Settings {
            quality: QualityPreset::Low,
            demo_bodies: 3,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::try_load(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_quality_from_command_line() {
        assert_eq!("MED".parse::<QualityPreset>().unwrap(), QualityPreset::Medium);
        assert_eq!("High".parse::<QualityPreset>().unwrap(), QualityPreset::High);
        assert!(matches!(
            "ultra".parse::<QualityPreset>(),
            Err(SettingsError::UnknownQuality(name)) if name == "ultra"
        ));
        // Display output parses back
        for quality in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(quality.to_string().parse::<QualityPreset>().unwrap(), quality);
        }
    }
}
