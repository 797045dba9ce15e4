//! Ray queries against collision shapes.
//!
//! Every test reports the entry point and the distance along the ray at
//! which it was reached. Directions are expected to be unit length; the
//! tests never renormalize them, so distances are in units of the
//! direction's length.

use glam::Vec3;

use crate::transform::Transform;

use super::collider::{
    capsule_segment, closest_point_on_capsule_axis, ColliderShape, DEGENERATE_AXIS_EPSILON,
};
use super::plane::Plane;

/// Tolerance of the ray-box bounds check.
pub const RAY_BOX_EPSILON: f32 = 1e-4;

/// A half-line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. `direction` is stored as given.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` through `target`, with a normalized direction.
    /// `None` when the two points coincide.
    pub fn towards(origin: Vec3, target: Vec3) -> Option<Self> {
        let direction = (target - origin).try_normalize()?;
        Some(Self { origin, direction })
    }

    #[inline]
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Where a ray met a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    pub point: Vec3,
    /// Distance along the ray, in multiples of its direction.
    pub distance: f32,
}

/// Intersect a ray with an infinite plane.
///
/// The distance may be negative when the plane lies behind the origin.
/// `None` when the ray runs parallel to the plane.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<RayIntersection> {
    let ln = plane.normal.dot(ray.direction);
    if ln.abs() <= f32::EPSILON {
        return None;
    }
    let to_plane = plane.point_on_plane() - ray.origin;
    let distance = to_plane.dot(plane.normal) / ln;
    Some(RayIntersection {
        point: ray.point_at(distance),
        distance,
    })
}

/// Ray against an axis-aligned box given by its centre and half extents.
///
/// Origins inside the box do not report a hit.
pub fn ray_box(
    ray: &Ray,
    center: Vec3,
    half_extents: Vec3,
    epsilon: f32,
) -> Option<RayIntersection> {
    let box_min = center - half_extents;
    let box_max = center + half_extents;

    let mut t_vals = Vec3::splat(-1.0);
    for i in 0..3 {
        let d = ray.direction[i];
        if d > 0.0 {
            t_vals[i] = (box_min[i] - ray.origin[i]) / d;
        } else if d < 0.0 {
            t_vals[i] = (box_max[i] - ray.origin[i]) / d;
        }
    }

    let best_t = t_vals.max_element();
    if best_t < 0.0 {
        return None;
    }

    let point = ray.point_at(best_t);
    for i in 0..3 {
        if point[i] + epsilon < box_min[i] || point[i] - epsilon > box_max[i] {
            return None;
        }
    }

    Some(RayIntersection {
        point,
        distance: best_t,
    })
}

/// Ray against an axis-aligned box. The transform's rotation is ignored.
pub fn ray_aabb(
    ray: &Ray,
    half_extents: Vec3,
    transform: &Transform,
    epsilon: f32,
) -> Option<RayIntersection> {
    ray_box(ray, transform.position, half_extents, epsilon)
}

/// Ray against an oriented box, tested in the box's local frame.
pub fn ray_obb(
    ray: &Ray,
    half_extents: Vec3,
    transform: &Transform,
    epsilon: f32,
) -> Option<RayIntersection> {
    let inverse = transform.rotation.conjugate();
    let local = Ray::new(
        inverse * (ray.origin - transform.position),
        inverse * ray.direction,
    );
    let hit = ray_box(&local, Vec3::ZERO, half_extents, epsilon)?;
    Some(RayIntersection {
        point: transform.transform_point(hit.point),
        distance: hit.distance,
    })
}

fn ray_sphere_at(ray: &Ray, center: Vec3, radius: f32) -> Option<RayIntersection> {
    let to_center = center - ray.origin;
    let projection = to_center.dot(ray.direction);
    if projection < 0.0 {
        return None;
    }

    let closest = ray.point_at(projection);
    let sphere_dist = (closest - center).length();
    if sphere_dist > radius {
        return None;
    }

    // A grazing ray has a zero offset and still counts as a hit.
    let offset = (radius * radius - sphere_dist * sphere_dist).max(0.0).sqrt();
    let distance = projection - offset;
    Some(RayIntersection {
        point: ray.point_at(distance),
        distance,
    })
}

/// Ray against a sphere centred on the transform's position.
///
/// Spheres whose centre lies behind the origin are missed. An origin inside
/// the sphere with the centre ahead yields a negative distance.
pub fn ray_sphere(ray: &Ray, radius: f32, transform: &Transform) -> Option<RayIntersection> {
    ray_sphere_at(ray, transform.position, radius)
}

/// Ray against a capsule.
///
/// The ray is first intersected with the plane that contains the capsule
/// axis and faces the ray origin. The hit is clamped onto the axis segment
/// and the ray is tested against a sphere of the capsule radius there. When
/// that plane cannot be built or the ray runs parallel to it, the ray
/// origin is clamped onto the segment instead.
pub fn ray_capsule(
    ray: &Ray,
    radius: f32,
    half_height: f32,
    transform: &Transform,
) -> Option<RayIntersection> {
    let (bottom, top) = capsule_segment(half_height, transform);
    let side = (top - bottom).cross(ray.origin - transform.position);

    let on_plane = if side.length() > DEGENERATE_AXIS_EPSILON {
        Plane::from_triangle(top, bottom, transform.position + side.normalize())
            .and_then(|plane| ray_plane(ray, &plane))
            .map(|hit| hit.point)
    } else {
        None
    };

    let center =
        closest_point_on_capsule_axis(half_height, transform, on_plane.unwrap_or(ray.origin));
    ray_sphere_at(ray, center, radius)
}

/// Ray against any collider shape, using [`RAY_BOX_EPSILON`] for boxes.
pub fn ray_intersection(
    ray: &Ray,
    shape: &ColliderShape,
    transform: &Transform,
) -> Option<RayIntersection> {
    ray_intersection_with_tolerance(ray, shape, transform, RAY_BOX_EPSILON)
}

/// Ray against any collider shape with an explicit box tolerance.
pub fn ray_intersection_with_tolerance(
    ray: &Ray,
    shape: &ColliderShape,
    transform: &Transform,
    box_epsilon: f32,
) -> Option<RayIntersection> {
    match *shape {
        ColliderShape::Aabb { half_extents } => ray_aabb(ray, half_extents, transform, box_epsilon),
        ColliderShape::Obb { half_extents } => ray_obb(ray, half_extents, transform, box_epsilon),
        ColliderShape::Sphere { radius } => ray_sphere(ray, radius, transform),
        ColliderShape::Capsule {
            radius,
            half_height,
        } => ray_capsule(ray, radius, half_height, transform),
    }
}
