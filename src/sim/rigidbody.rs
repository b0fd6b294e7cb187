//! Rigidbody: an entity with a speed limit
//!
//! The limit is applied lazily. `set_velocity` may leave the body faster than
//! `max_speed`; the next `update` rescales the velocity (direction kept)
//! before any motion is applied.

use glam::DVec2;

use super::entity::{Entity, Movable};
use crate::consts::SNAP_DISTANCE;

#[derive(Debug, Clone)]
pub struct Rigidbody {
    entity: Entity,
    /// Pixels per time unit, > 0
    max_speed: f64,
}

impl Rigidbody {
    pub fn new(entity: Entity, max_speed: f64) -> Self {
        Self { entity, max_speed }
    }

    #[inline]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    #[inline]
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    #[inline]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Current speed (velocity length)
    #[inline]
    pub fn speed(&self) -> f64 {
        self.entity.velocity().length()
    }

    /// Takes effect on the next `update`
    pub fn set_max_speed(&mut self, speed: f64) {
        self.max_speed = speed;
    }

    /// Direct assignment, no clamping
    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.entity.set_velocity(vx, vy);
    }

    pub fn stop(&mut self) {
        self.entity.set_velocity(0.0, 0.0);
    }

    /// Head for `(target_x, target_y)` at `speed`, or stop when within one unit
    pub fn move_towards(&mut self, target_x: f64, target_y: f64, speed: f64) {
        let delta = DVec2::new(target_x, target_y) - self.entity.position();
        let distance = delta.length();

        if distance > SNAP_DISTANCE {
            let velocity = delta / distance * speed;
            self.set_velocity(velocity.x, velocity.y);
        } else {
            self.stop();
        }
    }

    /// Clamp speed to `max_speed`, then advance like a plain entity
    pub fn update(&mut self, dt: f64) {
        self.clamp_speed();
        self.entity.update(dt);
    }

    fn clamp_speed(&mut self) {
        let velocity = self.entity.velocity();
        let speed = velocity.length();
        // speed > max_speed > 0, so the division is safe
        if speed > self.max_speed {
            let scaled = velocity * (self.max_speed / speed);
            log::trace!(
                "Rigidbody {}: speed {:.2} clamped to {:.2}",
                self.entity.id,
                speed,
                self.max_speed
            );
            self.entity.set_velocity(scaled.x, scaled.y);
        }
    }
}

impl Movable for Rigidbody {
    fn update(&mut self, dt: f64) {
        Rigidbody::update(self, dt);
    }

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn body_at(x: f64, y: f64, max_speed: f64) -> Rigidbody {
        Rigidbody::new(Entity::new(Rect::new(x, y, 16.0, 16.0)), max_speed)
    }

    #[test]
    fn test_update_clamps_preserving_direction() {
        let mut body = body_at(0.0, 0.0, 5.0);
        body.set_velocity(30.0, 40.0); // speed 50
        assert!((body.speed() - 50.0).abs() < EPSILON);

        body.update(1.0);
        let v = body.entity().velocity();
        assert!((v.x - 3.0).abs() < EPSILON);
        assert!((v.y - 4.0).abs() < EPSILON);
        // Motion uses the clamped velocity
        assert!((body.entity().position() - DVec2::new(3.0, 4.0)).length() < EPSILON);
    }

    #[test]
    fn test_under_limit_untouched() {
        let mut body = body_at(0.0, 0.0, 100.0);
        body.set_velocity(-3.0, 4.0);
        body.update(0.5);
        assert_eq!(body.entity().velocity(), DVec2::new(-3.0, 4.0));
        assert_eq!(body.entity().position(), DVec2::new(-1.5, 2.0));
    }

    #[test]
    fn test_set_max_speed_is_lazy() {
        let mut body = body_at(0.0, 0.0, 100.0);
        body.set_velocity(60.0, 80.0);
        body.set_max_speed(10.0);
        assert!((body.speed() - 100.0).abs() < EPSILON);

        body.update(0.0);
        assert!((body.speed() - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_stop() {
        let mut body = body_at(0.0, 0.0, 10.0);
        body.set_velocity(1.0, 1.0);
        body.update(1.0);
        assert!(!body.entity().is_changed());

        body.stop();
        assert!(body.entity().is_changed());
        assert_eq!(body.entity().velocity(), DVec2::ZERO);
    }

    #[test]
    fn test_move_towards_sets_heading() {
        let mut body = body_at(0.0, 0.0, 100.0);
        body.move_towards(30.0, 40.0, 10.0);
        let v = body.entity().velocity();
        assert!((v.x - 6.0).abs() < EPSILON);
        assert!((v.y - 8.0).abs() < EPSILON);
        assert!(body.entity().is_changed());
    }

    #[test]
    fn test_move_towards_snap_boundary() {
        // Exactly one unit away: stop
        let mut body = body_at(0.0, 0.0, 100.0);
        body.set_velocity(5.0, 5.0);
        body.move_towards(1.0, 0.0, 10.0);
        assert_eq!(body.entity().velocity(), DVec2::ZERO);

        // Just beyond: keep moving
        body.move_towards(1.001, 0.0, 10.0);
        assert!((body.speed() - 10.0).abs() < EPSILON);

        // On target: stop, no NaN from normalizing a zero vector
        body.move_towards(0.0, 0.0, 10.0);
        assert_eq!(body.entity().velocity(), DVec2::ZERO);
    }

    #[test]
    fn test_move_towards_converges() {
        let mut body = body_at(0.0, 0.0, 50.0);
        let target = DVec2::new(100.0, -40.0);
        for _ in 0..600 {
            body.move_towards(target.x, target.y, 200.0);
            body.update(1.0 / 60.0);
        }
        assert!((body.entity().position() - target).length() <= 1.0 + 50.0 / 60.0);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_max_after_update(
            vx in -1.0e4f64..1.0e4,
            vy in -1.0e4f64..1.0e4,
            max_speed in 0.01f64..500.0,
            dt in 0.0f64..1.0,
        ) {
            let mut body = body_at(0.0, 0.0, max_speed);
            body.set_velocity(vx, vy);
            body.update(dt);
            prop_assert!(body.speed() <= max_speed + 1e-9 * max_speed.max(1.0));
        }

        #[test]
        fn prop_clamp_keeps_direction(
            vx in -1.0e3f64..1.0e3,
            vy in -1.0e3f64..1.0e3,
            max_speed in 0.1f64..50.0,
        ) {
            prop_assume!(DVec2::new(vx, vy).length() > 1e-6);
            let mut body = body_at(0.0, 0.0, max_speed);
            body.set_velocity(vx, vy);
            body.update(0.0);
            let before = DVec2::new(vx, vy).normalize();
            let after = body.entity().velocity().normalize();
            prop_assert!((before - after).length() < 1e-9);
        }
    }
}
