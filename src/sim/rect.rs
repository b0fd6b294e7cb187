//! Rect: the plain data an entity moves around

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Width/height of a rect in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Area {
    pub width: f64,
    pub height: f64,
}

impl Area {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Position (center), velocity and area of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: DVec2,
    /// Pixels per time unit
    pub velocity: DVec2,
    pub area: Area,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            area: Area::new(width, height),
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = DVec2::new(vx, vy);
        self
    }
}
