//! Analytic collision world, the bundled [CollisionQuery] implementation

use crate::collision::{CollisionChannel, CollisionQuery, CollisionShape, SurfaceHit};
use bevy::prelude::*;

/// A collider registered with the analytic collision world
#[derive(Debug, Clone)]
pub struct WorldCollider {
    pub position: Vec3,
    pub shape: CollisionShape,
    pub channel: CollisionChannel,
    pub boundary: bool,
}

/// Collider registry answering navigation queries without a physics engine.
///
/// Games that already run a physics engine implement [CollisionQuery] over
/// their own query pipeline instead; this world only needs the colliders that
/// matter to navigation (obstacles, walkable ground, boundary surfaces).
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionWorld {
    colliders: Vec<WorldCollider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle collider
    pub fn add_obstacle(&mut self, position: Vec3, shape: CollisionShape) {
        self.colliders.push(WorldCollider {
            position,
            shape,
            channel: CollisionChannel::Obstacle,
            boundary: false,
        });
    }

    /// Register a walkable ground collider
    pub fn add_ground(&mut self, position: Vec3, shape: CollisionShape) {
        self.colliders.push(WorldCollider {
            position,
            shape,
            channel: CollisionChannel::Ground,
            boundary: false,
        });
    }

    /// Register an out-of-bounds boundary surface on the ground channel
    pub fn add_boundary(&mut self, position: Vec3, shape: CollisionShape) {
        self.colliders.push(WorldCollider {
            position,
            shape,
            channel: CollisionChannel::Ground,
            boundary: true,
        });
    }

    /// Drop every collider on one channel (called when dynamic obstacles move)
    pub fn clear_channel(&mut self, channel: CollisionChannel) {
        self.colliders.retain(|collider| collider.channel != channel);
    }

    /// Drop all colliders
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn on_channel(&self, channel: CollisionChannel) -> impl Iterator<Item = &WorldCollider> {
        self.colliders
            .iter()
            .filter(move |collider| collider.channel == channel)
    }
}

impl CollisionQuery for CollisionWorld {
    fn overlap_sphere(&self, position: Vec3, radius: f32, channel: CollisionChannel) -> Vec<Vec3> {
        self.on_channel(channel)
            .filter(|collider| {
                collider
                    .shape
                    .overlaps_sphere(collider.position, position, radius)
            })
            .map(|collider| collider.position)
            .collect()
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        channel: CollisionChannel,
    ) -> Option<SurfaceHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut nearest: Option<(f32, &WorldCollider)> = None;
        for collider in self.on_channel(channel) {
            // a sphere sweep is a ray against the radius-inflated shape
            let inflated = collider.shape.inflated(radius);
            if let Some(toi) = inflated.raycast(collider.position, origin, direction) {
                if toi <= max_distance && nearest.is_none_or(|(best, _)| toi < best) {
                    nearest = Some((toi, collider));
                }
            }
        }

        nearest.map(|(toi, collider)| {
            let cast_center = origin + direction * toi;
            SurfaceHit {
                point: collider
                    .shape
                    .closest_surface_point(collider.position, cast_center),
                boundary: collider.boundary,
            }
        })
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        channel: CollisionChannel,
    ) -> Option<SurfaceHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut nearest: Option<(f32, &WorldCollider)> = None;
        for collider in self.on_channel(channel) {
            if let Some(toi) = collider.shape.raycast(collider.position, origin, direction) {
                if toi <= max_distance && nearest.is_none_or(|(best, _)| toi < best) {
                    nearest = Some((toi, collider));
                }
            }
        }

        nearest.map(|(toi, collider)| SurfaceHit {
            point: origin + direction * toi,
            boundary: collider.boundary,
        })
    }
}
