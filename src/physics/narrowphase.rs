//! Narrowphase collision detection: one exact test per pair of shape kinds.
//!
//! Mixed-kind tests are directional. Each expects a specific kind as its
//! first operand (see [`super::dispatch`]) and reports the normal pointing
//! from the first operand towards the second.
//!
//! Capsules are never tested directly. Each capsule test picks the point on
//! the capsule's inner segment closest to the other shape, runs the matching
//! sphere test with a sphere of the capsule's radius at that point, and then
//! shifts the capsule-side contact offset back to the capsule's own origin.

use glam::{Quat, Vec3};

use crate::transform::Transform;

use super::collider::{
    closest_point_on_capsule_axis, obb_axes, obb_vertices, sat_axes, ColliderShape,
};
use super::contact::Contact;

/// Interval test on the three world axes. Touching boxes do not overlap.
#[inline]
pub fn aabb_overlap(position_a: Vec3, half_a: Vec3, position_b: Vec3, half_b: Vec3) -> bool {
    let delta = (position_b - position_a).abs();
    let total = half_a + half_b;
    delta.x < total.x && delta.y < total.y && delta.z < total.z
}

/// `1.0` unless `b` sorts strictly before `a`, then `-1.0`.
///
/// Pair tests with an order-dependent tie-break run in the order this picks
/// and flip the result otherwise, so exchanging the operands always negates
/// the normal. Only shapes with identical keys share an orientation.
#[inline]
fn operand_sign(a: &[f32], b: &[f32]) -> f32 {
    for (x, y) in a.iter().zip(b) {
        if x < y {
            return 1.0;
        }
        if x > y {
            return -1.0;
        }
    }
    1.0
}

fn aabb_key(half: Vec3, position: Vec3) -> [f32; 6] {
    [half.x, half.y, half.z, position.x, position.y, position.z]
}

fn obb_key(half: Vec3, transform: &Transform) -> [f32; 10] {
    let (p, q) = (transform.position, transform.rotation);
    [half.x, half.y, half.z, p.x, p.y, p.z, q.x, q.y, q.z, q.w]
}

/// Axis-aligned box against axis-aligned box.
///
/// Picks the face axis with the smallest of the six face separations.
pub fn aabb_aabb(
    half_a: Vec3,
    transform_a: &Transform,
    half_b: Vec3,
    transform_b: &Transform,
) -> Option<Contact> {
    let pos_a = transform_a.position;
    let pos_b = transform_b.position;
    if !aabb_overlap(pos_a, half_a, pos_b, half_b) {
        return None;
    }
    if operand_sign(&aabb_key(half_a, pos_a), &aabb_key(half_b, pos_b)) < 0.0 {
        return Some(aabb_faces(half_b, pos_b, half_a, pos_a).flipped());
    }
    Some(aabb_faces(half_a, pos_a, half_b, pos_b))
}

/// Least-separation face contact for two overlapping boxes.
fn aabb_faces(half_a: Vec3, pos_a: Vec3, half_b: Vec3, pos_b: Vec3) -> Contact {
    let (min_a, max_a) = (pos_a - half_a, pos_a + half_a);
    let (min_b, max_b) = (pos_b - half_b, pos_b + half_b);

    let faces = [
        (Vec3::NEG_X, max_b.x - min_a.x),
        (Vec3::X, max_a.x - min_b.x),
        (Vec3::NEG_Y, max_b.y - min_a.y),
        (Vec3::Y, max_a.y - min_b.y),
        (Vec3::NEG_Z, max_b.z - min_a.z),
        (Vec3::Z, max_a.z - min_b.z),
    ];

    let mut penetration = f32::MAX;
    let mut normal = Vec3::ZERO;
    for (face, distance) in faces {
        if distance < penetration {
            penetration = distance;
            normal = face;
        }
    }

    Contact::new(
        normal * half_a.dot(normal.abs()),
        -normal * half_b.dot(normal.abs()),
        normal,
        penetration,
    )
}

/// Sphere against sphere.
pub fn sphere_sphere(
    radius_a: f32,
    transform_a: &Transform,
    radius_b: f32,
    transform_b: &Transform,
) -> Option<Contact> {
    spheres(transform_a.position, radius_a, transform_b.position, radius_b)
}

fn spheres(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> Option<Contact> {
    let radii = radius_a + radius_b;
    let delta = center_b - center_a;
    let distance = delta.length();

    if distance >= radii {
        return None;
    }

    // Coincident centres: +Y from the smaller sphere.
    let normal = delta
        .try_normalize()
        .unwrap_or(Vec3::Y * operand_sign(&[radius_a], &[radius_b]));
    Some(Contact::new(
        normal * radius_a,
        -normal * radius_b,
        normal,
        radii - distance,
    ))
}

/// Closest point on a box (in box-local space) to a sphere centre.
///
/// Returns `(normal, penetration, closest)` in box-local space. A centre
/// inside the box is pushed out through the nearest face.
fn box_sphere_local(half: Vec3, center: Vec3, radius: f32) -> Option<(Vec3, f32, Vec3)> {
    let closest = center.clamp(-half, half);
    let offset = center - closest;
    let distance = offset.length();

    if distance >= radius {
        return None;
    }

    if let Some(normal) = offset.try_normalize() {
        return Some((normal, radius - distance, closest));
    }

    let depth = half - center.abs();
    let axis = if depth.x <= depth.y && depth.x <= depth.z {
        0
    } else if depth.y <= depth.z {
        1
    } else {
        2
    };
    let sign = if center[axis] >= 0.0 { 1.0 } else { -1.0 };

    let mut normal = Vec3::ZERO;
    normal[axis] = sign;
    let mut face_point = center;
    face_point[axis] = sign * half[axis];

    Some((normal, radius + depth[axis], face_point))
}

/// Axis-aligned box against sphere, box first.
pub fn aabb_sphere(
    half_a: Vec3,
    transform_a: &Transform,
    radius_b: f32,
    transform_b: &Transform,
) -> Option<Contact> {
    aabb_sphere_at(half_a, transform_a.position, transform_b.position, radius_b)
}

fn aabb_sphere_at(half: Vec3, box_position: Vec3, center: Vec3, radius: f32) -> Option<Contact> {
    let (normal, penetration, closest) = box_sphere_local(half, center - box_position, radius)?;
    Some(Contact::new(closest, -normal * radius, normal, penetration))
}

/// Oriented box against sphere, box first.
pub fn obb_sphere(
    half_a: Vec3,
    transform_a: &Transform,
    radius_b: f32,
    transform_b: &Transform,
) -> Option<Contact> {
    obb_sphere_at(half_a, transform_a, transform_b.position, radius_b)
}

fn obb_sphere_at(
    half: Vec3,
    box_transform: &Transform,
    center: Vec3,
    radius: f32,
) -> Option<Contact> {
    let local_center = box_transform.inverse_transform_point(center);
    let (normal, penetration, closest) = box_sphere_local(half, local_center, radius)?;

    let rotation = box_transform.rotation;
    let normal = (rotation * normal).normalize_or_zero();
    Some(Contact::new(
        rotation * closest,
        -normal * radius,
        normal,
        penetration,
    ))
}

/// Min and max of the vertices projected onto `axis`.
#[inline]
fn project(vertices: &[Vec3; 8], axis: Vec3) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::MAX, f32::MIN), |(lo, hi), d| (lo.min(d), hi.max(d)))
}

/// Half the width of an oriented box's projection onto `axis`.
#[inline]
fn projected_extent(half: Vec3, rotation: Quat, axis: Vec3) -> f32 {
    let [x, y, z] = obb_axes(rotation);
    half.x * x.dot(axis).abs() + half.y * y.dot(axis).abs() + half.z * z.dot(axis).abs()
}

/// SAT (Separating Axis Theorem) test for oriented box against oriented box.
///
/// Projects both boxes' corners onto the 15 candidate axes and stops at the
/// first separating one. Otherwise the axis with the smallest interval
/// overlap becomes the normal; ties keep the earliest candidate. Only one
/// contact point is produced, not a full face manifold.
///
/// The boxes are always tested in a fixed order, so swapping them yields the
/// same axis with the opposite sign.
pub fn sat_box_box(
    half_a: Vec3,
    transform_a: &Transform,
    half_b: Vec3,
    transform_b: &Transform,
) -> Option<Contact> {
    if operand_sign(&obb_key(half_a, transform_a), &obb_key(half_b, transform_b)) < 0.0 {
        return sat_ordered(half_b, transform_b, half_a, transform_a).map(Contact::flipped);
    }
    sat_ordered(half_a, transform_a, half_b, transform_b)
}

fn sat_ordered(
    half_a: Vec3,
    transform_a: &Transform,
    half_b: Vec3,
    transform_b: &Transform,
) -> Option<Contact> {
    let vertices_a = obb_vertices(half_a, transform_a);
    let vertices_b = obb_vertices(half_b, transform_b);

    let mut min_overlap = f32::MAX;
    let mut best_axis = Vec3::ZERO;

    for axis in sat_axes(transform_a.rotation, transform_b.rotation)
        .into_iter()
        .flatten()
    {
        let (min_a, max_a) = project(&vertices_a, axis);
        let (min_b, max_b) = project(&vertices_b, axis);

        let overlapping = (min_a <= min_b && min_b <= max_a) || (min_b <= min_a && min_a <= max_b);
        if !overlapping {
            return None;
        }

        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
    }

    // Ensure normal points from A to B. An offset perpendicular to the axis
    // keeps the axis as found.
    let t = transform_b.position - transform_a.position;
    let normal = if best_axis.dot(t) < 0.0 {
        -best_axis
    } else {
        best_axis
    };

    let extent_a = projected_extent(half_a, transform_a.rotation, normal);
    let extent_b = projected_extent(half_b, transform_b.rotation, normal);

    Some(Contact::new(
        normal * extent_a,
        -normal * extent_b,
        normal,
        min_overlap.max(0.0),
    ))
}

/// Axis-aligned box against oriented box, axis-aligned box first.
///
/// The AABB becomes an OBB with identity orientation and the SAT test runs
/// with the oriented box first, so the result is flipped back.
pub fn aabb_obb(
    half_a: Vec3,
    transform_a: &Transform,
    half_b: Vec3,
    transform_b: &Transform,
) -> Option<Contact> {
    let as_obb = Transform {
        rotation: Quat::IDENTITY,
        ..*transform_a
    };
    sat_box_box(half_b, transform_b, half_a, &as_obb).map(Contact::flipped)
}

/// Capsule against sphere, capsule first.
pub fn capsule_sphere(
    radius_a: f32,
    half_height_a: f32,
    transform_a: &Transform,
    radius_b: f32,
    transform_b: &Transform,
) -> Option<Contact> {
    let center = closest_point_on_capsule_axis(half_height_a, transform_a, transform_b.position);
    let mut contact = spheres(center, radius_a, transform_b.position, radius_b)?;
    contact.local_a += center - transform_a.position;
    Some(contact)
}

/// Capsule against axis-aligned box, capsule first.
pub fn capsule_aabb(
    radius_a: f32,
    half_height_a: f32,
    transform_a: &Transform,
    half_b: Vec3,
    transform_b: &Transform,
) -> Option<Contact> {
    let box_position = transform_b.position;
    let anchor = transform_a
        .position
        .clamp(box_position - half_b, box_position + half_b);
    let center = closest_point_on_capsule_axis(half_height_a, transform_a, anchor);

    let mut contact = aabb_sphere_at(half_b, box_position, center, radius_a)?.flipped();
    contact.local_a += center - transform_a.position;
    Some(contact)
}

/// Capsule against oriented box, capsule first.
pub fn capsule_obb(
    radius_a: f32,
    half_height_a: f32,
    transform_a: &Transform,
    half_b: Vec3,
    transform_b: &Transform,
) -> Option<Contact> {
    let local = transform_b
        .inverse_transform_point(transform_a.position)
        .clamp(-half_b, half_b);
    let anchor = transform_b.transform_point(local);
    let center = closest_point_on_capsule_axis(half_height_a, transform_a, anchor);

    let mut contact = obb_sphere_at(half_b, transform_b, center, radius_a)?.flipped();
    contact.local_a += center - transform_a.position;
    Some(contact)
}

/// Capsule against capsule.
///
/// Rejects early when the capsules' world bounds are disjoint, then reduces
/// each capsule to the sphere on its segment nearest the other's position.
pub fn capsule_capsule(
    radius_a: f32,
    half_height_a: f32,
    transform_a: &Transform,
    radius_b: f32,
    half_height_b: f32,
    transform_b: &Transform,
) -> Option<Contact> {
    let bounds_a = ColliderShape::Capsule {
        radius: radius_a,
        half_height: half_height_a,
    }
    .compute_aabb(transform_a);
    let bounds_b = ColliderShape::Capsule {
        radius: radius_b,
        half_height: half_height_b,
    }
    .compute_aabb(transform_b);
    if !bounds_a.overlaps(&bounds_b) {
        return None;
    }

    let center_a = closest_point_on_capsule_axis(half_height_a, transform_a, transform_b.position);
    let center_b = closest_point_on_capsule_axis(half_height_b, transform_b, transform_a.position);

    let mut contact = spheres(center_a, radius_a, center_b, radius_b)?;
    contact.local_a += center_a - transform_a.position;
    contact.local_b += center_b - transform_b.position;
    Some(contact)
}
