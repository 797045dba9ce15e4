//! Infinite planes used by the ray tests.

use glam::Vec3;

use super::collider::DEGENERATE_AXIS_EPSILON;

/// A plane in 3D space defined by the equation `n·p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector, not necessarily normalized.
    pub normal: Vec3,
    /// Offset term `d` of the plane equation.
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Plane through three points, wound counter-clockwise around the
    /// normal. `None` when the points are collinear.
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        let length = normal.length();
        if length < DEGENERATE_AXIS_EPSILON {
            return None;
        }
        Some(Self::from_point_normal(a, normal / length))
    }

    /// Normalize the plane equation.
    pub fn normalize(&self) -> Self {
        let len = self.normal.length();
        if len > 0.0 {
            Self {
                normal: self.normal / len,
                distance: self.distance / len,
            }
        } else {
            *self
        }
    }

    /// Signed distance from a point to the plane, scaled by the normal's
    /// length. Positive is in front (same side as the normal).
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// The point of the plane closest to the origin.
    pub fn point_on_plane(&self) -> Vec3 {
        let len_sq = self.normal.length_squared();
        if len_sq > 0.0 {
            self.normal * (-self.distance / len_sq)
        } else {
            Vec3::ZERO
        }
    }
}
