//! Spatial query interface consumed by the navigation core
//!
//! Obstruction probing, steering detection and ground snapping all go through
//! [CollisionQuery]. Games backed by a physics engine implement the trait over
//! their query pipeline; [CollisionWorld] is the bundled analytic
//! implementation and the test double.

use bevy::prelude::*;

pub mod shapes;
pub mod world;

pub use shapes::*;
pub use world::*;

/// Collision channels recognised by navigation queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionChannel {
    /// Anything an agent must path and steer around
    Obstacle,
    /// Walkable surfaces, including out-of-bounds boundary surfaces
    Ground,
}

/// Surface contact returned by casting queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    /// The hit surface marks the edge of the playable area
    pub boundary: bool,
}

/// Synchronous, side-effect-free queries against a snapshot of the world
pub trait CollisionQuery {
    /// Positions of colliders on `channel` whose shape intersects the probe sphere
    fn overlap_sphere(&self, position: Vec3, radius: f32, channel: CollisionChannel) -> Vec<Vec3>;

    /// Sweep a sphere along `direction` and report the nearest surface contact
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        channel: CollisionChannel,
    ) -> Option<SurfaceHit>;

    /// Cast a ray and report the nearest surface contact
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        channel: CollisionChannel,
    ) -> Option<SurfaceHit>;
}
