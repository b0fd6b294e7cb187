//! Dynamic lighting
//!
//! Lights are created from explicit parameters or from a named preset, can be
//! enabled/disabled any number of times, and are removed for good. The render
//! layer polls [`LightingSystem::get_all_lights`] (or the packed GPU form in
//! [`gpu`]) every frame.

pub mod gpu;
pub mod light;
pub mod presets;
pub mod system;

pub use gpu::{LightUniform, pack_enabled_lights};
pub use light::{Light, LightConfig, LightId};
pub use presets::{LightPreset, LightPresets, PresetError};
pub use system::{LightingError, LightingSystem};
