//! Lumen Sim - a small 2D entity simulation core
//!
//! Core modules:
//! - `sim`: Entities, rigidbodies, colliders and the world that ticks them
//! - `lighting`: Light lifecycle, presets and GPU packing for the render layer
//! - `settings`: JSON-backed configuration

pub mod lighting;
pub mod settings;
pub mod sim;

pub use lighting::{Light, LightConfig, LightId, LightPreset, LightPresets, LightingError, LightingSystem};
pub use settings::{QualityPreset, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// `move_towards` stops once the target is this close (strict `>` test)
    pub const SNAP_DISTANCE: f64 = 1.0;

    /// Max speed given to rigidbodies spawned without an explicit one
    pub const DEFAULT_MAX_SPEED: f64 = 240.0;
}
