//! Light records and creation parameters

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Light identifier, unique within one `LightingSystem` and never reused
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(String);

impl LightId {
    pub(crate) fn from_sequence(n: u64) -> Self {
        Self(format!("light-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LightId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LightId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Everything needed to create a light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub x: f64,
    pub y: f64,
    /// Reach in pixels
    pub radius: f64,
    /// 0xRRGGBB
    pub color: u32,
    pub intensity: f64,
    /// Attenuation exponent
    pub falloff: f64,
    pub enabled: bool,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            radius: 100.0,
            color: 0xFFFFFF,
            intensity: 1.0,
            falloff: 2.0,
            enabled: true,
        }
    }
}

/// A live light owned by a `LightingSystem`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub id: LightId,
    pub x: f64,
    pub y: f64,
    pub enabled: bool,
    pub radius: f64,
    pub color: u32,
    pub intensity: f64,
    pub falloff: f64,
    /// Preset this light was created from, if any
    pub preset: Option<String>,
}

impl Light {
    pub(crate) fn new(id: LightId, config: LightConfig, preset: Option<String>) -> Self {
        Self {
            id,
            x: config.x,
            y: config.y,
            enabled: config.enabled,
            radius: config.radius,
            color: config.color,
            intensity: config.intensity,
            falloff: config.falloff,
            preset,
        }
    }

    /// Color as linear-ish `[r, g, b]` in 0..=1
    pub fn rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| ((self.color >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }

    /// Parameters that would recreate this light
    pub fn config(&self) -> LightConfig {
        LightConfig {
            x: self.x,
            y: self.y,
            radius: self.radius,
            color: self.color,
            intensity: self.intensity,
            falloff: self.falloff,
            enabled: self.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        let light = Light::new(
            LightId::from_sequence(1),
            LightConfig {
                color: 0xFF8000,
                ..Default::default()
            },
            None,
        );
        assert_eq!(light.rgb(), [1.0, 128.0 / 255.0, 0.0]);
    }

    #[test]
    fn test_id_format() {
        let id = LightId::from_sequence(7);
        assert_eq!(id.as_str(), "light-7");
        assert_eq!(id.to_string(), "light-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"light-7\"");
    }

    #[test]
    fn test_config_round_trip() {
        let config = LightConfig {
            x: 3.0,
            y: -4.0,
            enabled: false,
            ..Default::default()
        };
        let light = Light::new(LightId::from_sequence(1), config, None);
        assert_eq!(light.config(), config);
    }
}
