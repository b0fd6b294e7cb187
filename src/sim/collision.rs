//! Collider shapes and axis-aligned overlap tests
//!
//! Colliders are plain values: a shape plus a position, no velocity and no
//! identity. Only rectangle pairs are tested. Any other shape makes the test
//! report "no collision" instead of failing the caller's frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axis-aligned rectangle positioned by its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleCollider {
    pub position: DVec2,
    pub width: f64,
    pub height: f64,
}

impl RectangleCollider {
    pub const fn new(position: DVec2, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.position.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.width / 2.0
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.position.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.height / 2.0
    }
}

/// Circle positioned by its center (not handled by the overlap test yet)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    pub position: DVec2,
    pub radius: f64,
}

/// Collider shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Collider {
    Rectangle(RectangleCollider),
    Circle(CircleCollider),
}

impl Collider {
    pub fn kind(&self) -> &'static str {
        match self {
            Collider::Rectangle(_) => "rectangle",
            Collider::Circle(_) => "circle",
        }
    }
}

impl From<RectangleCollider> for Collider {
    fn from(rect: RectangleCollider) -> Self {
        Collider::Rectangle(rect)
    }
}

impl From<CircleCollider> for Collider {
    fn from(circle: CircleCollider) -> Self {
        Collider::Circle(circle)
    }
}

/// Errors surfaced by [`try_collide`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollisionError {
    #[error("unsupported collider pair: {0} vs {1}")]
    InvalidShape(&'static str, &'static str),
}

/// Create a rectangle collider centered at `(x, y)`
pub fn create_rectangle_collider(x: f64, y: f64, width: f64, height: f64) -> Collider {
    Collider::Rectangle(RectangleCollider::new(DVec2::new(x, y), width, height))
}

/// Test the first two colliders of `colliders` for overlap
///
/// Fewer than two colliders, or a non-rectangle among the first two, yields
/// `false`. Anything past the second element is ignored.
pub fn is_collided(colliders: &[Collider]) -> bool {
    let [a, b, ..] = colliders else {
        return false;
    };
    match try_collide(a, b) {
        Ok(hit) => hit,
        Err(err) => {
            log::trace!("Collision test skipped: {}", err);
            false
        }
    }
}

/// Same as `is_collided(&[a, b])`
pub fn check_collision_between_two_rects(a: &Collider, b: &Collider) -> bool {
    is_collided(&[*a, *b])
}

/// Overlap test that reports unsupported shapes instead of hiding them
pub fn try_collide(a: &Collider, b: &Collider) -> Result<bool, CollisionError> {
    match (a, b) {
        (Collider::Rectangle(a), Collider::Rectangle(b)) => Ok(rects_overlap(a, b)),
        _ => Err(CollisionError::InvalidShape(a.kind(), b.kind())),
    }
}

/// Strict AABB overlap: rects that only share an edge do not collide
#[inline]
pub fn rects_overlap(a: &RectangleCollider, b: &RectangleCollider) -> bool {
    !(a.right() <= b.left()
        || a.left() >= b.right()
        || a.bottom() <= b.top()
        || a.top() >= b.bottom())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: f64, y: f64, radius: f64) -> Collider {
        Collider::Circle(CircleCollider {
            position: DVec2::new(x, y),
            radius,
        })
    }

    #[test]
    fn test_fewer_than_two_colliders() {
        assert!(!is_collided(&[]));
        assert!(!is_collided(&[create_rectangle_collider(0.0, 0.0, 10.0, 10.0)]));
    }

    #[test]
    fn test_overlapping_rects() {
        let a = create_rectangle_collider(0.0, 0.0, 10.0, 10.0);
        let b = create_rectangle_collider(5.0, 5.0, 10.0, 10.0);
        assert!(is_collided(&[a, b]));
        assert!(check_collision_between_two_rects(&a, &b));
    }

    #[test]
    fn test_separated_rects() {
        let a = create_rectangle_collider(0.0, 0.0, 10.0, 10.0);
        let b = create_rectangle_collider(50.0, 0.0, 10.0, 10.0);
        assert!(!is_collided(&[a, b]));
        let c = create_rectangle_collider(0.0, -50.0, 10.0, 10.0);
        assert!(!is_collided(&[a, c]));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // right of a == left of b == 5.0
        let a = create_rectangle_collider(0.0, 0.0, 10.0, 10.0);
        let b = create_rectangle_collider(10.0, 0.0, 10.0, 10.0);
        assert!(!is_collided(&[a, b]));
        assert!(!is_collided(&[b, a]));

        let b_shifted = create_rectangle_collider(10.0 - 0.01, 0.0, 10.0, 10.0);
        assert!(is_collided(&[a, b_shifted]));

        // Same on the vertical axis
        let c = create_rectangle_collider(0.0, 10.0, 10.0, 10.0);
        assert!(!is_collided(&[a, c]));
        let c_shifted = create_rectangle_collider(0.0, 10.0 - 0.01, 10.0, 10.0);
        assert!(is_collided(&[a, c_shifted]));
    }

    #[test]
    fn test_corner_touch_does_not_collide() {
        let a = create_rectangle_collider(0.0, 0.0, 10.0, 10.0);
        let b = create_rectangle_collider(10.0, 10.0, 10.0, 10.0);
        assert!(!is_collided(&[a, b]));
    }

    #[test]
    fn test_containment_collides() {
        let outer = create_rectangle_collider(0.0, 0.0, 100.0, 100.0);
        let inner = create_rectangle_collider(10.0, -10.0, 2.0, 2.0);
        assert!(is_collided(&[outer, inner]));
        assert!(is_collided(&[inner, outer]));
    }

    #[test]
    fn test_only_first_pair_is_tested() {
        let a = create_rectangle_collider(0.0, 0.0, 10.0, 10.0);
        let far = create_rectangle_collider(100.0, 100.0, 10.0, 10.0);
        let overlapping = create_rectangle_collider(1.0, 1.0, 10.0, 10.0);
        assert!(!is_collided(&[a, far, overlapping]));
        assert!(is_collided(&[a, overlapping, far]));
    }

    #[test]
    fn test_unsupported_shape_is_no_collision() {
        let rect = create_rectangle_collider(0.0, 0.0, 10.0, 10.0);
        let round = circle(0.0, 0.0, 10.0);
        assert!(!is_collided(&[rect, round]));
        assert!(!is_collided(&[round, rect]));
        assert!(!check_collision_between_two_rects(&round, &round));

        assert_eq!(
            try_collide(&rect, &round),
            Err(CollisionError::InvalidShape("rectangle", "circle"))
        );
        assert_eq!(try_collide(&rect, &rect), Ok(true));
    }

    #[test]
    fn test_collider_serde_tag() {
        let collider = create_rectangle_collider(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&collider).unwrap();
        assert!(json.contains("\"type\":\"rectangle\""));
        let back: Collider = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collider);
    }

    fn rect_strategy() -> impl Strategy<Value = Collider> {
        (-100.0f64..100.0, -100.0f64..100.0, 0.0f64..60.0, 0.0f64..60.0)
            .prop_map(|(x, y, w, h)| create_rectangle_collider(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_pair_wrapper_matches_sequence(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(check_collision_between_two_rects(&a, &b), is_collided(&[a, b]));
        }

        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(is_collided(&[a, b]), is_collided(&[b, a]));
        }
    }
}
