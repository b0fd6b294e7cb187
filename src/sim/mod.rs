//! Entity simulation module
//!
//! Everything that moves lives here:
//! - Fixed timestep only (see `World::advance`)
//! - Stable iteration order (by entity ID)
//! - No rendering dependencies; visuals are reached through the `Visual` trait

pub mod collision;
pub mod entity;
pub mod rect;
pub mod rigidbody;
pub mod world;

pub use collision::{
    CircleCollider, Collider, CollisionError, RectangleCollider, check_collision_between_two_rects,
    create_rectangle_collider, is_collided, try_collide,
};
pub use entity::{Entity, Movable, Visual};
pub use rect::{Area, Rect};
pub use rigidbody::Rigidbody;
pub use world::{Body, World};
