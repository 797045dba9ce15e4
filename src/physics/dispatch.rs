//! Routing of shape pairs to their narrowphase test.
//!
//! Mixed-kind tests only accept one operand order. [`canonicalize`] puts a
//! pair into that order and reports whether it swapped the operands; the
//! contact is flipped back before it is returned, so callers always see the
//! normal pointing from their first shape towards their second.

use crate::transform::Transform;

use super::collider::{ColliderShape, ShapeKind};
use super::contact::Contact;
use super::narrowphase::{
    aabb_aabb, aabb_obb, aabb_sphere, capsule_aabb, capsule_capsule, capsule_obb, capsule_sphere,
    obb_sphere, sat_box_box, sphere_sphere,
};

/// A shape together with its placement.
#[derive(Debug, Clone, Copy)]
pub struct Body<'a> {
    pub shape: &'a ColliderShape,
    pub transform: &'a Transform,
}

impl<'a> Body<'a> {
    pub fn new(shape: &'a ColliderShape, transform: &'a Transform) -> Self {
        Self { shape, transform }
    }
}

/// The 10 unordered combinations of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    AabbAabb,
    AabbObb,
    AabbSphere,
    AabbCapsule,
    ObbObb,
    ObbSphere,
    ObbCapsule,
    SphereSphere,
    SphereCapsule,
    CapsuleCapsule,
}

impl PairKind {
    /// Unordered pair kind of two shape kinds.
    pub fn of(a: ShapeKind, b: ShapeKind) -> Self {
        use ShapeKind::{Aabb, Capsule, Obb, Sphere};
        match (a, b) {
            (Aabb, Aabb) => PairKind::AabbAabb,
            (Aabb, Obb) | (Obb, Aabb) => PairKind::AabbObb,
            (Aabb, Sphere) | (Sphere, Aabb) => PairKind::AabbSphere,
            (Aabb, Capsule) | (Capsule, Aabb) => PairKind::AabbCapsule,
            (Obb, Obb) => PairKind::ObbObb,
            (Obb, Sphere) | (Sphere, Obb) => PairKind::ObbSphere,
            (Obb, Capsule) | (Capsule, Obb) => PairKind::ObbCapsule,
            (Sphere, Sphere) => PairKind::SphereSphere,
            (Sphere, Capsule) | (Capsule, Sphere) => PairKind::SphereCapsule,
            (Capsule, Capsule) => PairKind::CapsuleCapsule,
        }
    }
}

/// Position of a kind in the operand order the directional tests expect.
///
/// Capsule tests take the capsule first, box tests take the box before the
/// sphere, and the AABB goes before the OBB.
#[inline]
fn dispatch_rank(kind: ShapeKind) -> u8 {
    match kind {
        ShapeKind::Capsule => 0,
        ShapeKind::Aabb => 1,
        ShapeKind::Obb => 2,
        ShapeKind::Sphere => 3,
    }
}

/// Reorder a pair into handler order. The flag is true when `a` and `b`
/// were exchanged, meaning the resulting contact must be flipped.
#[inline]
pub fn canonicalize<'a>(a: Body<'a>, b: Body<'a>) -> (Body<'a>, Body<'a>, bool) {
    if dispatch_rank(a.shape.kind()) > dispatch_rank(b.shape.kind()) {
        (b, a, true)
    } else {
        (a, b, false)
    }
}

/// Test a pair already in handler order.
fn test_canonical(first: Body<'_>, second: Body<'_>) -> Option<Contact> {
    let (ta, tb) = (first.transform, second.transform);
    match (*first.shape, *second.shape) {
        (
            ColliderShape::Aabb { half_extents: ha },
            ColliderShape::Aabb { half_extents: hb },
        ) => aabb_aabb(ha, ta, hb, tb),
        (ColliderShape::Aabb { half_extents: ha }, ColliderShape::Obb { half_extents: hb }) => {
            aabb_obb(ha, ta, hb, tb)
        }
        (ColliderShape::Aabb { half_extents }, ColliderShape::Sphere { radius }) => {
            aabb_sphere(half_extents, ta, radius, tb)
        }
        (ColliderShape::Obb { half_extents: ha }, ColliderShape::Obb { half_extents: hb }) => {
            sat_box_box(ha, ta, hb, tb)
        }
        (ColliderShape::Obb { half_extents }, ColliderShape::Sphere { radius }) => {
            obb_sphere(half_extents, ta, radius, tb)
        }
        (ColliderShape::Sphere { radius: ra }, ColliderShape::Sphere { radius: rb }) => {
            sphere_sphere(ra, ta, rb, tb)
        }
        (
            ColliderShape::Capsule {
                radius,
                half_height,
            },
            ColliderShape::Aabb { half_extents },
        ) => capsule_aabb(radius, half_height, ta, half_extents, tb),
        (
            ColliderShape::Capsule {
                radius,
                half_height,
            },
            ColliderShape::Obb { half_extents },
        ) => capsule_obb(radius, half_height, ta, half_extents, tb),
        (
            ColliderShape::Capsule {
                radius,
                half_height,
            },
            ColliderShape::Sphere { radius: rb },
        ) => capsule_sphere(radius, half_height, ta, rb, tb),
        (
            ColliderShape::Capsule {
                radius: ra,
                half_height: ha,
            },
            ColliderShape::Capsule {
                radius: rb,
                half_height: hb,
            },
        ) => capsule_capsule(ra, ha, ta, rb, hb, tb),
        (a, b) => {
            tracing::trace!(
                first = ?a.kind(),
                second = ?b.kind(),
                "no narrowphase handler for operand order"
            );
            None
        }
    }
}

/// Detect collision between two shapes.
///
/// Returns the contact with its normal pointing from `shape_a` towards
/// `shape_b`, or `None` when the shapes are apart.
pub fn detect_collision(
    shape_a: &ColliderShape,
    transform_a: &Transform,
    shape_b: &ColliderShape,
    transform_b: &Transform,
) -> Option<Contact> {
    let (first, second, swapped) = canonicalize(
        Body::new(shape_a, transform_a),
        Body::new(shape_b, transform_b),
    );
    let contact = test_canonical(first, second)?;
    Some(if swapped { contact.flipped() } else { contact })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn shape_of(kind: ShapeKind) -> ColliderShape {
        match kind {
            ShapeKind::Aabb => ColliderShape::Aabb {
                half_extents: Vec3::new(1.0, 0.75, 0.5),
            },
            ShapeKind::Obb => ColliderShape::Obb {
                half_extents: Vec3::new(0.5, 1.0, 0.75),
            },
            ShapeKind::Sphere => ColliderShape::Sphere { radius: 0.8 },
            ShapeKind::Capsule => ColliderShape::Capsule {
                radius: 0.4,
                half_height: 0.6,
            },
        }
    }

    #[test]
    fn test_pair_kind_is_unordered() {
        let mut seen = std::collections::HashSet::new();
        for a in ShapeKind::ALL {
            for b in ShapeKind::ALL {
                assert_eq!(PairKind::of(a, b), PairKind::of(b, a));
                seen.insert(PairKind::of(a, b));
            }
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_canonicalize_reports_swap() {
        let sphere = shape_of(ShapeKind::Sphere);
        let aabb = shape_of(ShapeKind::Aabb);
        let t = Transform::identity();

        let (first, second, swapped) = canonicalize(Body::new(&sphere, &t), Body::new(&aabb, &t));
        assert!(swapped);
        assert_eq!(first.shape.kind(), ShapeKind::Aabb);
        assert_eq!(second.shape.kind(), ShapeKind::Sphere);

        let (_, _, swapped) = canonicalize(Body::new(&aabb, &t), Body::new(&sphere, &t));
        assert!(!swapped);
    }

    #[test]
    fn test_every_pair_is_wired() {
        // Every ordered pair, slightly offset so each kind overlaps the other.
        let ta = Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_y(0.3));
        let tb = Transform::from_position_rotation(
            Vec3::new(0.6, 0.3, 0.1),
            Quat::from_rotation_x(0.2),
        );
        for a in ShapeKind::ALL {
            for b in ShapeKind::ALL {
                let contact = detect_collision(&shape_of(a), &ta, &shape_of(b), &tb);
                let contact = contact.unwrap_or_else(|| panic!("{a:?} vs {b:?} missed"));
                assert!(contact.penetration >= 0.0, "{a:?} vs {b:?}");
                assert!(
                    (contact.normal.length() - 1.0).abs() < 1e-4,
                    "{a:?} vs {b:?} normal {:?}",
                    contact.normal
                );
            }
        }
    }

    #[test]
    fn test_swapped_order_negates_normal() {
        let ta = Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_z(0.25));
        let tb = Transform::from_position_rotation(
            Vec3::new(1.1, 0.4, -0.2),
            Quat::from_rotation_y(0.5),
        );
        for a in ShapeKind::ALL {
            for b in ShapeKind::ALL {
                let (sa, sb) = (shape_of(a), shape_of(b));
                assert_swap_negates(&sa, &ta, &sb, &tb);
            }
        }
    }

    fn assert_swap_negates(
        sa: &ColliderShape,
        ta: &Transform,
        sb: &ColliderShape,
        tb: &Transform,
    ) {
        let ab = detect_collision(sa, ta, sb, tb);
        let ba = detect_collision(sb, tb, sa, ta);
        assert_eq!(ab.is_some(), ba.is_some(), "{sa:?} vs {sb:?}");
        if let (Some(ab), Some(ba)) = (ab, ba) {
            assert!((ab.normal + ba.normal).length() < 1e-5, "{sa:?} vs {sb:?}: {ab:?} {ba:?}");
            assert!((ab.local_a - ba.local_b).length() < 1e-5, "{sa:?} vs {sb:?}");
            assert!((ab.local_b - ba.local_a).length() < 1e-5, "{sa:?} vs {sb:?}");
            assert!((ab.penetration - ba.penetration).abs() < 1e-5);
        }
    }

    #[test]
    fn test_swapped_order_negates_normal_on_ties() {
        let cube = Vec3::ONE;
        let slab = Vec3::new(1.0, 0.1, 1.0);
        let origin = Transform::identity();
        // Offset perpendicular to the least-overlap axis.
        let beside = Transform::from_position(Vec3::new(0.5, 0.0, 0.0));
        let turned = Transform::from_position_rotation(
            Vec3::new(0.0, 0.0, 0.3),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
        );

        let obb = |half_extents| ColliderShape::Obb { half_extents };
        let aabb = |half_extents| ColliderShape::Aabb { half_extents };
        let sphere = |radius| ColliderShape::Sphere { radius };

        let cases = [
            (obb(cube), origin, obb(slab), beside),
            (aabb(cube), origin, aabb(slab), beside),
            // Nested boxes tie on every face.
            (aabb(cube), origin, aabb(Vec3::splat(0.5)), origin),
            (obb(cube), origin, obb(Vec3::splat(0.5)), origin),
            (obb(cube), origin, obb(cube), turned),
            (sphere(1.0), origin, sphere(0.5), origin),
        ];
        for (sa, ta, sb, tb) in cases {
            assert!(detect_collision(&sa, &ta, &sb, &tb).is_some(), "{sa:?} vs {sb:?}");
            assert_swap_negates(&sa, &ta, &sb, &tb);
        }
    }

    #[test]
    fn test_sphere_box_normal_points_at_second_shape() {
        let sphere = ColliderShape::Sphere { radius: 0.5 };
        let aabb = ColliderShape::Aabb {
            half_extents: Vec3::ONE,
        };
        let ts = Transform::from_position(Vec3::new(0.0, 1.25, 0.0));
        let tb = Transform::identity();

        let contact = detect_collision(&sphere, &ts, &aabb, &tb).expect("sphere on box");
        assert!((contact.normal - Vec3::NEG_Y).length() < 1e-5);
        assert!((contact.local_a - Vec3::new(0.0, -0.5, 0.0)).length() < 1e-5);
        assert!((contact.local_b - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_detect_collision_separated() {
        let t_far = Transform::from_position(Vec3::new(50.0, 0.0, 0.0));
        let t = Transform::identity();
        for a in ShapeKind::ALL {
            for b in ShapeKind::ALL {
                assert!(detect_collision(&shape_of(a), &t, &shape_of(b), &t_far).is_none());
            }
        }
    }
}
