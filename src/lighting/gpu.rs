//! GPU-side light records
//!
//! The renderer uploads a flat array of [`LightUniform`]s each frame. Only
//! enabled lights are packed, strongest first, up to the quality budget.

use bytemuck::{Pod, Zeroable};

use super::light::Light;
use super::system::LightingSystem;

/// One light as laid out in the shader's storage buffer (32 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 2],
    pub radius: f32,
    pub intensity: f32,
    pub color: [f32; 3],
    pub falloff: f32,
}

impl From<&Light> for LightUniform {
    fn from(light: &Light) -> Self {
        Self {
            position: [light.x as f32, light.y as f32],
            radius: light.radius as f32,
            intensity: light.intensity as f32,
            color: light.rgb(),
            falloff: light.falloff as f32,
        }
    }
}

/// Enabled lights, brightest first, at most `max_lights` of them
pub fn pack_enabled_lights(lighting: &LightingSystem<'_>, max_lights: usize) -> Vec<LightUniform> {
    let mut lights: Vec<&Light> = lighting.enabled_lights().collect();
    // Id tiebreak keeps the packed order stable across frames
    lights.sort_by(|a, b| {
        b.intensity
            .total_cmp(&a.intensity)
            .then_with(|| a.id.cmp(&b.id))
    });
    if lights.len() > max_lights {
        log::debug!(
            "Light budget exceeded: {} enabled, packing {}",
            lights.len(),
            max_lights
        );
    }
    lights
        .into_iter()
        .take(max_lights)
        .map(LightUniform::from)
        .collect()
}

/// Raw bytes ready for a buffer upload
pub fn as_bytes(uniforms: &[LightUniform]) -> &[u8] {
    bytemuck::cast_slice(uniforms)
}
