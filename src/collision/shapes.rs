//! Geometric collider shapes and their query predicates

use bevy::prelude::*;

/// Geometric shapes for collision detection
#[derive(Debug, Clone)]
pub enum CollisionShape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl CollisionShape {
    /// Check if a world position is inside this shape
    pub fn contains_point(&self, center: Vec3, point: Vec3) -> bool {
        match self {
            CollisionShape::Sphere { radius } => point.distance(center) <= *radius,
            CollisionShape::Cuboid { half_extents } => {
                let rel = point - center;
                rel.x.abs() <= half_extents.x
                    && rel.y.abs() <= half_extents.y
                    && rel.z.abs() <= half_extents.z
            }
        }
    }

    /// Check if this shape intersects a probe sphere
    pub fn overlaps_sphere(&self, center: Vec3, position: Vec3, radius: f32) -> bool {
        match self {
            CollisionShape::Sphere { radius: own } => position.distance(center) <= own + radius,
            CollisionShape::Cuboid { half_extents } => {
                let min = center - *half_extents;
                let max = center + *half_extents;
                let closest = position.clamp(min, max);
                closest.distance(position) <= radius
            }
        }
    }

    /// Closest point on the shape's surface to an external point.
    /// A point inside a cuboid is returned unchanged.
    pub fn closest_surface_point(&self, center: Vec3, point: Vec3) -> Vec3 {
        match self {
            CollisionShape::Sphere { radius } => {
                let toward = (point - center).normalize_or_zero();
                center + toward * *radius
            }
            CollisionShape::Cuboid { half_extents } => {
                point.clamp(center - *half_extents, center + *half_extents)
            }
        }
    }

    /// Distance along a normalized ray to the first intersection, if any
    pub fn raycast(&self, center: Vec3, origin: Vec3, direction: Vec3) -> Option<f32> {
        match self {
            CollisionShape::Sphere { radius } => ray_sphere(origin, direction, center, *radius),
            CollisionShape::Cuboid { half_extents } => {
                ray_aabb(origin, direction, center - *half_extents, center + *half_extents)
            }
        }
    }

    /// Shape grown by `amount` on every side, used for sphere casts
    pub fn inflated(&self, amount: f32) -> CollisionShape {
        match self {
            CollisionShape::Sphere { radius } => CollisionShape::Sphere {
                radius: radius + amount,
            },
            CollisionShape::Cuboid { half_extents } => CollisionShape::Cuboid {
                half_extents: *half_extents + Vec3::splat(amount),
            },
        }
    }
}

fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt = discriminant.sqrt();
    let near = -b - sqrt;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt;
    if far >= 0.0 {
        return Some(0.0); // origin inside the sphere
    }
    None
}

fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let origins = [origin.x, origin.y, origin.z];
    let directions = [direction.x, direction.y, direction.z];
    let mins = [min.x, min.y, min.z];
    let maxs = [max.x, max.y, max.z];

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        if directions[axis].abs() < f32::EPSILON {
            if origins[axis] < mins[axis] || origins[axis] > maxs[axis] {
                return None;
            }
            continue;
        }
        let inverse = 1.0 / directions[axis];
        let mut t0 = (mins[axis] - origins[axis]) * inverse;
        let mut t1 = (maxs[axis] - origins[axis]) * inverse;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_contains_point() {
        let shape = CollisionShape::Sphere { radius: 2.0 };
        let center = Vec3::ZERO;

        assert!(shape.contains_point(center, Vec3::new(1.0, 1.0, 1.0)));
        assert!(!shape.contains_point(center, Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_cuboid_contains_point() {
        let shape = CollisionShape::Cuboid {
            half_extents: Vec3::new(2.0, 1.0, 2.0),
        };
        let center = Vec3::ZERO;

        assert!(shape.contains_point(center, Vec3::new(1.5, 0.5, 1.5)));
        assert!(!shape.contains_point(center, Vec3::new(2.5, 0.0, 0.0)));
        assert!(!shape.contains_point(center, Vec3::new(0.0, 1.5, 0.0)));
    }

    #[test]
    fn test_sphere_overlaps_sphere() {
        let shape = CollisionShape::Sphere { radius: 1.0 };
        let center = Vec3::new(3.0, 0.0, 0.0);

        assert!(shape.overlaps_sphere(center, Vec3::ZERO, 2.5));
        assert!(!shape.overlaps_sphere(center, Vec3::ZERO, 1.5));
    }

    #[test]
    fn test_cuboid_overlaps_sphere() {
        let shape = CollisionShape::Cuboid {
            half_extents: Vec3::splat(1.0),
        };
        let center = Vec3::new(3.0, 0.0, 0.0);

        // closest face point is at x = 2
        assert!(shape.overlaps_sphere(center, Vec3::ZERO, 2.1));
        assert!(!shape.overlaps_sphere(center, Vec3::ZERO, 1.9));
    }

    #[test]
    fn test_ray_hits_sphere_front_face() {
        let shape = CollisionShape::Sphere { radius: 1.0 };
        let center = Vec3::new(5.0, 0.0, 0.0);

        let toi = shape.raycast(center, Vec3::ZERO, Vec3::X).unwrap();
        assert!((toi - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_misses_sphere() {
        let shape = CollisionShape::Sphere { radius: 1.0 };
        let center = Vec3::new(5.0, 0.0, 0.0);

        assert!(shape.raycast(center, Vec3::ZERO, Vec3::Z).is_none());
        // pointing away
        assert!(shape.raycast(center, Vec3::ZERO, Vec3::NEG_X).is_none());
    }

    #[test]
    fn test_ray_hits_cuboid_top_face() {
        let shape = CollisionShape::Cuboid {
            half_extents: Vec3::new(5.0, 0.5, 5.0),
        };
        let center = Vec3::new(0.0, -0.5, 0.0);

        // straight down from above lands on the top face at y = 0
        let toi = shape
            .raycast(center, Vec3::new(1.0, 2.0, 1.0), Vec3::NEG_Y)
            .unwrap();
        assert!((toi - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_parallel_to_cuboid_face() {
        let shape = CollisionShape::Cuboid {
            half_extents: Vec3::splat(1.0),
        };
        let center = Vec3::ZERO;

        // parallel ray outside the slab never enters
        assert!(
            shape
                .raycast(center, Vec3::new(-5.0, 2.0, 0.0), Vec3::X)
                .is_none()
        );
        // parallel ray inside the slab does
        assert!(
            shape
                .raycast(center, Vec3::new(-5.0, 0.5, 0.0), Vec3::X)
                .is_some()
        );
    }

    #[test]
    fn test_closest_surface_point() {
        let sphere = CollisionShape::Sphere { radius: 2.0 };
        let point = sphere.closest_surface_point(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        assert!((point - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-4);

        let cuboid = CollisionShape::Cuboid {
            half_extents: Vec3::splat(1.0),
        };
        let point = cuboid.closest_surface_point(Vec3::ZERO, Vec3::new(5.0, 0.5, 0.0));
        assert!((point - Vec3::new(1.0, 0.5, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_inflated() {
        let sphere = CollisionShape::Sphere { radius: 1.0 };
        match sphere.inflated(0.5) {
            CollisionShape::Sphere { radius } => assert_eq!(radius, 1.5),
            _ => panic!("sphere should inflate to a sphere"),
        }

        let cuboid = CollisionShape::Cuboid {
            half_extents: Vec3::splat(1.0),
        };
        match cuboid.inflated(0.5) {
            CollisionShape::Cuboid { half_extents } => {
                assert_eq!(half_extents, Vec3::splat(1.5));
            }
            _ => panic!("cuboid should inflate to a cuboid"),
        }
    }
}
