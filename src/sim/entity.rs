//! Entities: a Rect advanced by its velocity each tick
//!
//! An entity never owns its visual. The render layer keeps the visual alive
//! and hands the entity a weak handle; the entity only ever calls
//! [`Visual::set_position`] on it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DVec2;

use super::collision::RectangleCollider;
use super::rect::{Area, Rect};

/// The one thing the simulation needs from a rendered object
pub trait Visual {
    fn set_position(&mut self, x: f64, y: f64);
}

/// Something the world can tick
pub trait Movable {
    /// Advance by `dt` time units
    fn update(&mut self, dt: f64);

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;
}

/// A moving rect with an optional attached visual
#[derive(Debug, Clone)]
pub struct Entity {
    /// World-assigned id (0 until spawned)
    pub id: u32,
    rect: Rect,
    visual: Option<Weak<RefCell<dyn Visual>>>,
    /// Set whenever position or velocity is mutated, cleared by `update`
    is_changed: bool,
}

impl Entity {
    pub fn new(rect: Rect) -> Self {
        Self {
            id: 0,
            rect,
            visual: None,
            is_changed: false,
        }
    }

    /// Attach a visual owned elsewhere; it is resynced on the next update
    pub fn attach_visual<V: Visual + 'static>(&mut self, visual: &Rc<RefCell<V>>) {
        let weak = Rc::downgrade(visual);
        self.visual = Some(weak as Weak<RefCell<dyn Visual>>);
        self.is_changed = true;
    }

    /// True while the visual still exists on the render side
    pub fn has_visual(&self) -> bool {
        self.visual
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.rect.position
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.rect.velocity
    }

    #[inline]
    pub fn area(&self) -> Area {
        self.rect.area
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.is_changed
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.rect.position = DVec2::new(x, y);
        self.is_changed = true;
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.rect.velocity = DVec2::new(vx, vy);
        self.is_changed = true;
    }

    /// Move by an offset without touching velocity
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.rect.position += DVec2::new(dx, dy);
        self.is_changed = true;
    }

    /// Current bounds as a collider value
    pub fn collider(&self) -> RectangleCollider {
        RectangleCollider::new(
            self.rect.position,
            self.rect.area.width,
            self.rect.area.height,
        )
    }

    /// Advance `position += velocity * dt`, resync the visual, clear the dirty flag
    ///
    /// `update(0.0)` never changes position or velocity.
    pub fn update(&mut self, dt: f64) {
        let step = self.rect.velocity * dt;
        let moved = step != DVec2::ZERO;
        if moved {
            self.rect.position += step;
        }

        if moved || self.is_changed {
            self.sync_visual();
        }
        self.is_changed = false;
    }

    fn sync_visual(&self) {
        let Some(visual) = self.visual.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        match visual.try_borrow_mut() {
            Ok(mut visual) => visual.set_position(self.rect.position.x, self.rect.position.y),
            Err(_) => log::warn!("Entity {}: visual busy, skipping position sync", self.id),
        }
    }
}

impl Movable for Entity {
    fn update(&mut self, dt: f64) {
        Entity::update(self, dt);
    }

    fn entity(&self) -> &Entity {
        self
    }

    fn entity_mut(&mut self) -> &mut Entity {
        self
    }
}
