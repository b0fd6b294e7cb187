//! Light lifecycle: created → enabled/disabled → removed

use std::collections::HashMap;

use thiserror::Error;

use super::light::{Light, LightConfig, LightId};
use super::presets::LightPresets;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LightingError {
    /// The id was never issued, or the light has been removed
    #[error("no light with id {0:?}")]
    NotFound(String),
    #[error("unknown light preset {0:?}")]
    UnknownPreset(String),
}

/// Owns every light created through it
#[derive(Debug, Clone)]
pub struct LightingSystem<'p> {
    presets: &'p LightPresets,
    lights: HashMap<LightId, Light>,
    /// Last issued sequence number; ids are never reused
    last_id: u64,
}

impl Default for LightingSystem<'static> {
    fn default() -> Self {
        Self::new(LightPresets::builtin())
    }
}

impl<'p> LightingSystem<'p> {
    pub fn new(presets: &'p LightPresets) -> Self {
        Self {
            presets,
            lights: HashMap::new(),
            last_id: 0,
        }
    }

    pub fn presets(&self) -> &'p LightPresets {
        self.presets
    }

    /// Create a light from explicit parameters
    pub fn create_light(&mut self, config: LightConfig) -> LightId {
        self.insert(config, None)
    }

    /// Create a light from a named preset placed at `(x, y)`
    pub fn create_light_from_preset(
        &mut self,
        preset_name: &str,
        x: f64,
        y: f64,
    ) -> Result<LightId, LightingError> {
        let preset = self
            .presets
            .get(preset_name)
            .ok_or_else(|| LightingError::UnknownPreset(preset_name.to_owned()))?;
        Ok(self.insert(preset.at(x, y), Some(preset_name.to_owned())))
    }

    fn insert(&mut self, config: LightConfig, preset: Option<String>) -> LightId {
        self.last_id += 1;
        let id = LightId::from_sequence(self.last_id);
        log::info!(
            "Created {} at ({:.1}, {:.1}){}",
            id,
            config.x,
            config.y,
            preset
                .as_deref()
                .map(|name| format!(" from preset {name}"))
                .unwrap_or_default()
        );
        self.lights
            .insert(id.clone(), Light::new(id.clone(), config, preset));
        id
    }

    pub fn set_light_enabled(&mut self, id: &str, enabled: bool) -> Result<(), LightingError> {
        let light = self.get_light_mut(id)?;
        if light.enabled != enabled {
            log::debug!("{} {}", id, if enabled { "enabled" } else { "disabled" });
        }
        light.enabled = enabled;
        Ok(())
    }

    /// Flip `enabled`, returning the new state
    pub fn toggle_light(&mut self, id: &str) -> Result<bool, LightingError> {
        let light = self.get_light_mut(id)?;
        light.enabled = !light.enabled;
        log::debug!("{} toggled to {}", id, light.enabled);
        Ok(light.enabled)
    }

    pub fn set_light_position(&mut self, id: &str, x: f64, y: f64) -> Result<(), LightingError> {
        let light = self.get_light_mut(id)?;
        light.x = x;
        light.y = y;
        Ok(())
    }

    /// Remove a light for good, handing back its final state
    pub fn remove_light(&mut self, id: &str) -> Result<Light, LightingError> {
        let light = self
            .lights
            .remove(id)
            .ok_or_else(|| LightingError::NotFound(id.to_owned()))?;
        log::info!("Removed {}", id);
        Ok(light)
    }

    pub fn get_light(&self, id: &str) -> Result<&Light, LightingError> {
        self.lights
            .get(id)
            .ok_or_else(|| LightingError::NotFound(id.to_owned()))
    }

    fn get_light_mut(&mut self, id: &str) -> Result<&mut Light, LightingError> {
        self.lights
            .get_mut(id)
            .ok_or_else(|| LightingError::NotFound(id.to_owned()))
    }

    /// Every live light, in no particular order
    pub fn get_all_lights(&self) -> Vec<&Light> {
        self.lights.values().collect()
    }

    pub fn enabled_lights(&self) -> impl Iterator<Item = &Light> {
        self.lights.values().filter(|light| light.enabled)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}
