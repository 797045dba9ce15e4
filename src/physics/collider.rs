//! Collider shapes and the geometric helpers shared by the pair tests.

use glam::{Quat, Vec3};

use crate::error::{Error, Result};
use crate::transform::Transform;

/// Cross products shorter than this are treated as parallel edges.
pub(crate) const DEGENERATE_AXIS_EPSILON: f32 = 1e-6;

/// Convex collision primitive.
///
/// Dimensions are world-space extents. Placement lives in a [`Transform`].
/// Capsules are aligned with their local Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Box that ignores the placement's rotation.
    Aabb { half_extents: Vec3 },
    /// Box that follows the placement's rotation.
    Obb { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// `half_height` is half the length of the inner segment, caps excluded.
    Capsule { radius: f32, half_height: f32 },
}

/// Tag of a [`ColliderShape`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Aabb,
    Obb,
    Sphere,
    Capsule,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Aabb,
        ShapeKind::Obb,
        ShapeKind::Sphere,
        ShapeKind::Capsule,
    ];
}

impl ColliderShape {
    /// Validated axis-aligned box.
    pub fn aabb(half_extents: Vec3) -> Result<Self> {
        validate_extents(half_extents)?;
        Ok(Self::Aabb { half_extents })
    }

    /// Validated oriented box.
    pub fn obb(half_extents: Vec3) -> Result<Self> {
        validate_extents(half_extents)?;
        Ok(Self::Obb { half_extents })
    }

    /// Validated sphere.
    pub fn sphere(radius: f32) -> Result<Self> {
        validate_dimension("radius", radius)?;
        Ok(Self::Sphere { radius })
    }

    /// Validated capsule.
    pub fn capsule(radius: f32, half_height: f32) -> Result<Self> {
        validate_dimension("radius", radius)?;
        validate_dimension("half height", half_height)?;
        Ok(Self::Capsule {
            radius,
            half_height,
        })
    }

    /// The variant tag.
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            ColliderShape::Aabb { .. } => ShapeKind::Aabb,
            ColliderShape::Obb { .. } => ShapeKind::Obb,
            ColliderShape::Sphere { .. } => ShapeKind::Sphere,
            ColliderShape::Capsule { .. } => ShapeKind::Capsule,
        }
    }

    /// Compute the world-space AABB for this shape.
    #[inline]
    pub fn compute_aabb(&self, transform: &Transform) -> PhysicsAabb {
        match *self {
            ColliderShape::Aabb { half_extents } => PhysicsAabb {
                min: transform.position - half_extents,
                max: transform.position + half_extents,
            },
            ColliderShape::Obb { half_extents } => {
                aabb_from_extents(half_extents, transform.position, transform.rotation)
            }
            ColliderShape::Sphere { radius } => PhysicsAabb {
                min: transform.position - Vec3::splat(radius),
                max: transform.position + Vec3::splat(radius),
            },
            ColliderShape::Capsule {
                radius,
                half_height,
            } => {
                let extents = Vec3::new(radius, half_height + radius, radius);
                aabb_from_extents(extents, transform.position, transform.rotation)
            }
        }
    }
}

fn validate_dimension(what: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDimension { what, value })
    }
}

fn validate_extents(half_extents: Vec3) -> Result<()> {
    validate_dimension("half extent", half_extents.x)?;
    validate_dimension("half extent", half_extents.y)?;
    validate_dimension("half extent", half_extents.z)
}

/// Axis-aligned bounds in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsAabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl PhysicsAabb {
    /// Test whether two AABBs overlap.
    #[inline]
    pub fn overlaps(&self, other: &PhysicsAabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// World-space AABB of a box with the given half extents, centre and rotation.
#[inline]
fn aabb_from_extents(half_extents: Vec3, center: Vec3, rotation: Quat) -> PhysicsAabb {
    let [x, y, z] = obb_axes(rotation);
    let extent = x.abs() * half_extents.x + y.abs() * half_extents.y + z.abs() * half_extents.z;

    PhysicsAabb {
        min: center - extent,
        max: center + extent,
    }
}

/// Local principal axes of a rotation, in world space.
#[inline]
pub fn obb_axes(rotation: Quat) -> [Vec3; 3] {
    [rotation * Vec3::X, rotation * Vec3::Y, rotation * Vec3::Z]
}

/// The eight world-space corners of an oriented box.
pub fn obb_vertices(half_extents: Vec3, transform: &Transform) -> [Vec3; 8] {
    let h = half_extents;
    [
        Vec3::new(-h.x, -h.y, -h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, h.z),
    ]
    .map(|corner| transform.transform_point(corner))
}

/// The 15 separating-axis candidates for two oriented boxes.
///
/// Order: A's three face axes, B's three face axes, then `a_i x b_j` for
/// `i` outer and `j` inner. Cross products of (near) parallel edges are `None`.
pub fn sat_axes(rotation_a: Quat, rotation_b: Quat) -> [Option<Vec3>; 15] {
    let axes_a = obb_axes(rotation_a);
    let axes_b = obb_axes(rotation_b);

    let mut axes = [None; 15];
    for i in 0..3 {
        axes[i] = Some(axes_a[i]);
        axes[i + 3] = Some(axes_b[i]);
    }
    for i in 0..3 {
        for j in 0..3 {
            let cross = axes_a[i].cross(axes_b[j]);
            let len = cross.length();
            if len >= DEGENERATE_AXIS_EPSILON {
                axes[6 + i * 3 + j] = Some(cross / len);
            }
        }
    }
    axes
}

/// End points `(bottom, top)` of a capsule's inner segment.
#[inline]
pub fn capsule_segment(half_height: f32, transform: &Transform) -> (Vec3, Vec3) {
    let extent = transform.up() * half_height;
    (transform.position - extent, transform.position + extent)
}

/// Point on a capsule's inner segment closest to `point`.
///
/// With a zero half height this is exactly the capsule's position, so the
/// capsule behaves as a sphere.
pub fn closest_point_on_capsule_axis(half_height: f32, transform: &Transform, point: Vec3) -> Vec3 {
    let (bottom, top) = capsule_segment(half_height, transform);
    let axis = top - bottom;
    let length = axis.length();
    if length < DEGENERATE_AXIS_EPSILON {
        return transform.position;
    }
    let direction = axis / length;
    let along = (point - bottom).dot(direction).clamp(0.0, length);
    bottom + direction * along
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_sphere_aabb() {
        let shape = ColliderShape::Sphere { radius: 1.0 };
        let transform = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
        let aabb = shape.compute_aabb(&transform);

        let eps = 1e-5;
        assert!((aabb.min - Vec3::new(-1.0, 4.0, -1.0)).length() < eps);
        assert!((aabb.max - Vec3::new(1.0, 6.0, 1.0)).length() < eps);
    }

    #[test]
    fn test_aabb_ignores_rotation() {
        let shape = ColliderShape::Aabb {
            half_extents: Vec3::new(1.0, 2.0, 3.0),
        };
        let transform =
            Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        let aabb = shape.compute_aabb(&transform);

        let eps = 1e-5;
        assert!((aabb.min - Vec3::new(-1.0, -2.0, -3.0)).length() < eps);
        assert!((aabb.max - Vec3::new(1.0, 2.0, 3.0)).length() < eps);
    }

    #[test]
    fn test_rotated_capsule_aabb() {
        let shape = ColliderShape::Capsule {
            radius: 0.5,
            half_height: 1.0,
        };
        let transform =
            Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_z(FRAC_PI_2));
        let aabb = shape.compute_aabb(&transform);

        let eps = 1e-5;
        assert!((aabb.max - Vec3::new(1.5, 0.5, 0.5)).length() < eps);
    }

    #[test]
    fn test_aabb_overlap() {
        let a = PhysicsAabb {
            min: Vec3::new(-1.0, -1.0, -1.0),
            max: Vec3::new(1.0, 1.0, 1.0),
        };
        let b = PhysicsAabb {
            min: Vec3::new(0.5, 0.5, 0.5),
            max: Vec3::new(2.0, 2.0, 2.0),
        };
        let c = PhysicsAabb {
            min: Vec3::new(2.5, 2.5, 2.5),
            max: Vec3::new(3.0, 3.0, 3.0),
        };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_obb_vertices_rotated() {
        let transform = Transform::from_position_rotation(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_rotation_y(FRAC_PI_2),
        );
        let vertices = obb_vertices(Vec3::new(2.0, 1.0, 1.0), &transform);

        // The long local X axis now runs along world Z.
        let max_z = vertices.iter().map(|v| v.z).fold(f32::MIN, f32::max);
        let max_x = vertices.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        assert!((max_z - 2.0).abs() < 1e-5);
        assert!((max_x - 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_sat_axes_skip_parallel_edges() {
        let axes = sat_axes(Quat::IDENTITY, Quat::IDENTITY);
        assert_eq!(axes.iter().filter(|a| a.is_some()).count(), 12);
        // x cross x, y cross y, z cross z
        assert!(axes[6].is_none());
        assert!(axes[10].is_none());
        assert!(axes[14].is_none());
        for axis in axes.iter().flatten() {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_closest_point_on_capsule_axis_clamps() {
        let transform = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));

        let above = closest_point_on_capsule_axis(1.0, &transform, Vec3::new(3.0, 10.0, 0.0));
        assert!((above - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);

        let beside = closest_point_on_capsule_axis(1.0, &transform, Vec3::new(3.0, 1.5, 0.0));
        assert!((beside - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_zero_height_capsule_axis_is_its_position() {
        let transform = Transform::from_position(Vec3::new(4.0, -2.0, 1.0));
        let p = closest_point_on_capsule_axis(0.0, &transform, Vec3::new(9.0, 9.0, 9.0));
        assert_eq!(p, transform.position);
    }

    #[test]
    fn test_validated_constructors() {
        assert!(ColliderShape::sphere(1.0).is_ok());
        assert!(matches!(
            ColliderShape::sphere(-1.0),
            Err(Error::InvalidDimension { what: "radius", .. })
        ));
        assert!(ColliderShape::capsule(0.5, f32::NAN).is_err());
        assert!(ColliderShape::obb(Vec3::new(1.0, -0.1, 1.0)).is_err());
        assert_eq!(
            ColliderShape::aabb(Vec3::ONE).map(|s| s.kind()),
            Ok(ShapeKind::Aabb)
        );
    }
}
