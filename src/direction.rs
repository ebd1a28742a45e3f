//! The 26 canonical probe directions shared by steering and ground detection

use bevy::prelude::*;

/// Every axis combination of {-1, 0, 1} except the zero vector
pub const DIRECTION_COUNT: usize = 26;

/// Precomputed unit directions in a fixed, deterministic order
#[derive(Debug, Clone)]
pub struct DirectionSet {
    directions: [Vec3; DIRECTION_COUNT],
}

impl DirectionSet {
    pub fn new() -> Self {
        let values = [-1.0_f32, 0.0, 1.0];
        let mut directions = [Vec3::ZERO; DIRECTION_COUNT];
        let mut index = 0;

        for x in values {
            for y in values {
                for z in values {
                    let direction = Vec3::new(x, y, z);
                    if direction == Vec3::ZERO {
                        continue;
                    }
                    directions[index] = direction.normalize();
                    index += 1;
                }
            }
        }

        Self { directions }
    }

    pub fn directions(&self) -> &[Vec3; DIRECTION_COUNT] {
        &self.directions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.directions.iter()
    }

    /// Directions usable for horizontal probing (zero vertical component)
    pub fn horizontal(&self) -> impl Iterator<Item = &Vec3> {
        self.directions.iter().filter(|direction| direction.y == 0.0)
    }
}

impl Default for DirectionSet {
    fn default() -> Self {
        Self::new()
    }
}
