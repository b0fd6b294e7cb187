//! Named light presets
//!
//! A preset table is built once (the built-in one lazily, a custom one from
//! JSON at startup) and never mutated afterwards. Lighting systems borrow it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::light::LightConfig;

/// Default parameters for one kind of light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightPreset {
    pub radius: f64,
    pub color: u32,
    pub intensity: f64,
    pub falloff: f64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl LightPreset {
    const fn new(radius: f64, color: u32, intensity: f64, falloff: f64) -> Self {
        Self {
            radius,
            color,
            intensity,
            falloff,
            enabled: true,
        }
    }

    /// Preset defaults placed at `(x, y)`
    pub fn at(&self, x: f64, y: f64) -> LightConfig {
        LightConfig {
            x,
            y,
            radius: self.radius,
            color: self.color,
            intensity: self.intensity,
            falloff: self.falloff,
            enabled: self.enabled,
        }
    }
}

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("invalid preset table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable name → preset table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightPresets {
    presets: BTreeMap<String, LightPreset>,
}

static BUILTIN: LazyLock<LightPresets> = LazyLock::new(|| {
    LightPresets::from_entries([
        ("torch", LightPreset::new(180.0, 0xFF9933, 1.0, 2.0)),
        ("candle", LightPreset::new(80.0, 0xFFCC66, 0.6, 2.5)),
        ("lantern", LightPreset::new(140.0, 0xFFE0A0, 0.85, 1.8)),
        ("campfire", LightPreset::new(260.0, 0xFF6A1F, 1.3, 1.5)),
        ("spotlight", LightPreset::new(320.0, 0xFFFFFF, 1.6, 1.0)),
        ("ambient", LightPreset::new(1000.0, 0x8899CC, 0.25, 0.5)),
    ])
});

impl LightPresets {
    /// The process-wide built-in table
    pub fn builtin() -> &'static LightPresets {
        &BUILTIN
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, LightPreset)>) -> Self {
        Self {
            presets: entries
                .into_iter()
                .map(|(name, preset)| (name.to_owned(), preset))
                .collect(),
        }
    }

    /// Parse a `{ "name": { radius, color, intensity, falloff } }` table
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        let presets: Self = serde_json::from_str(json)?;
        log::info!("Loaded {} light presets", presets.len());
        Ok(presets)
    }

    pub fn get(&self, name: &str) -> Option<&LightPreset> {
        self.presets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Preset names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
