//! Context steering: blend interest against per-direction danger
//!
//! Each query rebuilds the danger weights from scratch, weighs every detected
//! contact into the 26 canonical directions, and subtracts them from the same
//! weighting of the interest direction. The caller moves along the returned
//! vector and reports back whether the move was blocked, which drives the
//! interest-strength hysteresis.

use crate::collision::{CollisionChannel, CollisionQuery};
use crate::config::SteeringSettings;
use crate::direction::{DIRECTION_COUNT, DirectionSet};
use bevy::prelude::*;

/// Per-agent obstacle detection and steering state
#[derive(Component, Debug, Clone)]
pub struct ObstacleDetection {
    detection_range: f32,
    danger_range: f32,
    agent_radius: f32,
    strength_correction: f32,
    directions: DirectionSet,
    interest_strength: f32,
}

impl ObstacleDetection {
    pub fn new(settings: &SteeringSettings) -> Self {
        Self {
            detection_range: settings.detection_range.get(),
            danger_range: settings.danger_range.get(),
            agent_radius: settings.agent_radius.get(),
            strength_correction: settings.strength_correction.get(),
            directions: DirectionSet::new(),
            interest_strength: 1.0,
        }
    }

    /// Blend the interest direction against detected danger and return the
    /// safest direction to move in right now.
    ///
    /// A zero interest direction is valid and yields pure avoidance. A zero
    /// result means danger balanced interest everywhere; the caller decides
    /// the fallback (typically retrying with a zero interest).
    pub fn preferred_direction(
        &self,
        position: Vec3,
        interest: Vec3,
        world: &dyn CollisionQuery,
    ) -> Vec3 {
        let mut contacts = Vec::new();
        self.detect_obstacles(position, world, &mut contacts);
        self.detect_ground(position, world, &mut contacts);

        // rebuilt every query so stale danger can never leak between frames
        let mut danger = [0.0_f32; DIRECTION_COUNT];
        for contact in &contacts {
            self.add_weight(&mut danger, position, *contact, 1.0);
        }

        let mut interests = [0.0_f32; DIRECTION_COUNT];
        let interest = interest.normalize_or_zero();
        if interest != Vec3::ZERO {
            self.add_weight(
                &mut interests,
                position,
                position + interest,
                self.interest_strength,
            );
        }

        let mut preferred = Vec3::ZERO;
        for (index, direction) in self.directions.iter().enumerate() {
            preferred += *direction * (interests[index] - danger[index]);
        }
        preferred.y = 0.0;
        preferred.normalize_or_zero()
    }

    /// Current interest strength in [0, 1]
    pub fn interest_strength(&self) -> f32 {
        self.interest_strength
    }

    /// Feed back whether the last chosen direction was immediately blocked.
    ///
    /// Blocked moves decay the interest strength by the configured correction,
    /// letting danger dominate until a move succeeds again; a clean move
    /// resets it. This breaks the oscillation where the nominally best
    /// direction keeps being re-picked against a near-miss obstacle.
    pub fn apply_move_feedback(&mut self, blocked: bool) {
        if blocked {
            self.interest_strength =
                (self.interest_strength - self.strength_correction).max(0.0);
        } else {
            self.interest_strength = 1.0;
        }
    }

    /// Follow-up probe for [apply_move_feedback](Self::apply_move_feedback):
    /// does an obstacle sit immediately along `direction`?
    pub fn is_direction_blocked(
        &self,
        position: Vec3,
        direction: Vec3,
        world: &dyn CollisionQuery,
    ) -> bool {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return false;
        }
        let probe = position + direction * (self.agent_radius * 2.0);
        !world
            .overlap_sphere(probe, self.agent_radius, CollisionChannel::Obstacle)
            .is_empty()
    }

    /// Find the surface contact of every obstacle within detection range
    fn detect_obstacles(&self, position: Vec3, world: &dyn CollisionQuery, contacts: &mut Vec<Vec3>) {
        for collider in world.overlap_sphere(position, self.detection_range, CollisionChannel::Obstacle)
        {
            let toward = (collider - position).normalize_or_zero();
            if toward == Vec3::ZERO {
                continue;
            }
            // sweep at slightly under the agent radius to find the surface,
            // not the collider origin
            if let Some(hit) = world.sphere_cast(
                position,
                self.agent_radius * 0.95,
                toward,
                self.detection_range,
                CollisionChannel::Obstacle,
            ) {
                contacts.push(hit.point);
            }
        }
    }

    /// Probe for ground at growing offsets along every horizontal direction.
    /// Missing ground stops the probe; a boundary surface counts as danger.
    fn detect_ground(&self, position: Vec3, world: &dyn CollisionQuery, contacts: &mut Vec<Vec3>) {
        let radii = [self.agent_radius, self.danger_range, self.detection_range];
        for direction in self.directions.horizontal() {
            for radius in radii {
                if !self.ground_below(position + *direction * radius, world, contacts) {
                    break;
                }
            }
        }
    }

    fn ground_below(&self, edge: Vec3, world: &dyn CollisionQuery, contacts: &mut Vec<Vec3>) -> bool {
        let Some(hit) = world.raycast(edge, Vec3::NEG_Y, f32::INFINITY, CollisionChannel::Ground)
        else {
            return false;
        };
        if !hit.boundary {
            return true;
        }
        // falling off the edge is as dangerous as hitting a wall
        contacts.push(hit.point);
        false
    }

    /// Weigh one contact into every direction: alignment times proximity
    fn add_weight(
        &self,
        weights: &mut [f32; DIRECTION_COUNT],
        position: Vec3,
        contact: Vec3,
        scale: f32,
    ) {
        let toward = (contact - position).normalize_or_zero();
        let distance = contact.distance(position);
        let distance_weight = if distance <= self.danger_range {
            1.0
        } else {
            ((self.detection_range - distance) / self.detection_range).max(0.0)
        };

        for (index, direction) in self.directions.iter().enumerate() {
            let dot = direction.dot(toward).clamp(0.0, 1.0);
            weights[index] += dot * distance_weight * scale;
        }
    }
}
