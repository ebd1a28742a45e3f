//! Bundled default of the graph-build collaborator
//!
//! Games with their own grid or navmesh generation feed positions straight to
//! [NodeGraph::from_positions](crate::graph::NodeGraph::from_positions); this
//! builder covers the common case of a rectangular arena with raycastable
//! ground.

use crate::collision::{CollisionChannel, CollisionQuery};
use bevy::prelude::*;

/// Sample a rectangular extent at `frequency` spacing, snapping each sample to
/// the ground below (or above) it. Samples with no ground, or whose nearest
/// surface is a boundary, produce no node.
pub fn grid_positions(
    center: Vec3,
    extent: Vec2,
    frequency: f32,
    world: &dyn CollisionQuery,
) -> Vec<Vec3> {
    let origin = Vec3::new(
        center.x - extent.x * 0.5,
        center.y,
        center.z - extent.y * 0.5,
    );
    let columns = (extent.x / frequency).floor() as usize + 1;
    let rows = (extent.y / frequency).floor() as usize + 1;

    let mut positions = Vec::with_capacity(columns * rows);
    for column in 0..columns {
        for row in 0..rows {
            let sample = origin + Vec3::new(column as f32 * frequency, 0.0, row as f32 * frequency);
            let hit = world
                .raycast(sample, Vec3::NEG_Y, f32::INFINITY, CollisionChannel::Ground)
                .or_else(|| world.raycast(sample, Vec3::Y, f32::INFINITY, CollisionChannel::Ground));
            let Some(hit) = hit else {
                continue;
            };
            if hit.boundary {
                continue;
            }
            positions.push(hit.point);
        }
    }

    debug!(
        "grid builder: {kept}/{sampled} samples snapped to ground",
        kept = positions.len(),
        sampled = columns * rows
    );
    positions
}
