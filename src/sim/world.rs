//! World: owns every body and ticks them at a fixed rate
//!
//! Bodies are stored sorted by id so iteration order (and therefore
//! collision pair order) is stable between runs.

use super::collision::{Collider, check_collision_between_two_rects};
use super::entity::{Entity, Movable};
use super::rect::Rect;
use super::rigidbody::Rigidbody;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;

/// A body living in the world
#[derive(Debug, Clone)]
pub enum Body {
    /// Moves at whatever velocity it is given
    Kinematic(Entity),
    /// Speed-limited
    Rigid(Rigidbody),
}

impl Body {
    #[inline]
    pub fn id(&self) -> u32 {
        self.entity().id
    }

    pub fn as_rigidbody_mut(&mut self) -> Option<&mut Rigidbody> {
        match self {
            Body::Rigid(body) => Some(body),
            Body::Kinematic(_) => None,
        }
    }
}

impl Movable for Body {
    fn update(&mut self, dt: f64) {
        match self {
            Body::Kinematic(entity) => entity.update(dt),
            Body::Rigid(body) => body.update(dt),
        }
    }

    fn entity(&self) -> &Entity {
        match self {
            Body::Kinematic(entity) => entity,
            Body::Rigid(body) => body.entity(),
        }
    }

    fn entity_mut(&mut self) -> &mut Entity {
        match self {
            Body::Kinematic(entity) => entity,
            Body::Rigid(body) => body.entity_mut(),
        }
    }
}

#[derive(Debug)]
pub struct World {
    bodies: Vec<Body>,
    next_id: u32,
    /// Unconsumed frame time, always < `sim_dt` after `advance`
    accumulator: f64,
    time_ticks: u64,
    sim_dt: f64,
    max_substeps: u32,
    max_frame_dt: f64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_DT)
    }
}

impl World {
    /// `max_substeps` of 0 is raised to 1 and a negative (or NaN)
    /// `max_frame_dt` to 0, since both usually come from a settings file
    pub fn new(sim_dt: f64, max_substeps: u32, max_frame_dt: f64) -> Self {
        if max_substeps == 0 || max_frame_dt.is_nan() || max_frame_dt < 0.0 {
            log::warn!(
                "Adjusting step limits (max_substeps {}, max_frame_dt {})",
                max_substeps,
                max_frame_dt
            );
        }
        Self {
            bodies: Vec::new(),
            next_id: 1,
            accumulator: 0.0,
            time_ticks: 0,
            sim_dt,
            max_substeps: max_substeps.max(1),
            max_frame_dt: max_frame_dt.max(0.0),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sim_dt(), settings.max_substeps, settings.max_frame_dt)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a body that moves without a speed limit
    pub fn spawn_entity(&mut self, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        let mut entity = Entity::new(rect);
        entity.id = id;
        self.bodies.push(Body::Kinematic(entity));
        log::debug!("Spawned entity {}", id);
        id
    }

    pub fn spawn_rigidbody(&mut self, rect: Rect, max_speed: f64) -> u32 {
        let id = self.next_entity_id();
        let mut entity = Entity::new(rect);
        entity.id = id;
        self.bodies.push(Body::Rigid(Rigidbody::new(entity, max_speed)));
        log::debug!("Spawned rigidbody {} (max speed {})", id, max_speed);
        id
    }

    /// Remove a body; its visual (if any) is left to the render layer
    pub fn despawn(&mut self, id: u32) -> Option<Body> {
        let index = self.index_of(id)?;
        log::debug!("Despawned body {}", id);
        Some(self.bodies.remove(index))
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, Body::id).ok()
    }

    pub fn get(&self, id: u32) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Body> {
        self.index_of(id).map(|i| &mut self.bodies[i])
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.get(id).map(|body| body.entity())
    }

    pub fn entity_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.get_mut(id).map(|body| body.entity_mut())
    }

    pub fn rigidbody_mut(&mut self, id: u32) -> Option<&mut Rigidbody> {
        self.get_mut(id).and_then(Body::as_rigidbody_mut)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Ticks run since creation
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn sim_dt(&self) -> f64 {
        self.sim_dt
    }

    /// Update every body once with `dt`
    pub fn step(&mut self, dt: f64) {
        for body in &mut self.bodies {
            body.update(dt);
        }
        self.time_ticks += 1;
    }

    /// Feed one frame's elapsed time; runs as many fixed steps as fit
    ///
    /// Returns the number of steps taken. Large frame deltas are clamped and
    /// at most `max_substeps` steps run per call; time left over past that
    /// cap is dropped, keeping only the fraction of a step.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, self.max_frame_dt);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < self.max_substeps {
            self.step(self.sim_dt);
            self.accumulator -= self.sim_dt;
            substeps += 1;
        }

        if substeps == self.max_substeps && self.accumulator >= self.sim_dt {
            log::debug!(
                "Dropping {:.4}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator %= self.sim_dt;
        }
        substeps
    }

    /// Ids of every body overlapping `id`, ascending
    pub fn collisions_with(&self, id: u32) -> Vec<u32> {
        let Some(target) = self.entity(id) else {
            return Vec::new();
        };
        let collider = Collider::from(target.collider());
        self.bodies
            .iter()
            .filter(|body| body.id() != id)
            .filter(|body| {
                check_collision_between_two_rects(&collider, &Collider::from(body.entity().collider()))
            })
            .map(Body::id)
            .collect()
    }

    /// Every overlapping pair `(a, b)` with `a < b`
    pub fn colliding_pairs(&self) -> Vec<(u32, u32)> {
        let colliders: Vec<_> = self
            .bodies
            .iter()
            .map(|body| (body.id(), Collider::from(body.entity().collider())))
            .collect();

        let mut pairs = Vec::new();
        for (i, (id_a, a)) in colliders.iter().enumerate() {
            for (id_b, b) in &colliders[i + 1..] {
                if check_collision_between_two_rects(a, b) {
                    pairs.push((*id_a, *id_b));
                }
            }
        }
        pairs
    }
}
