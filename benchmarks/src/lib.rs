//! Shared setup helpers for rein-collision benchmarks.
//!
//! ## Running
//!
//! Narrow phase, ray tests and picking (criterion):
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench collision
//!
//! World passes on the rayon pool:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench collision --features parallel
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench collision -- narrowphase
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench collision -- raycast

use glam::{Quat, Vec3};
use rein_collision::ecs::components::physics::{Collider, CollisionLayers};
use rein_collision::physics::collider::{ColliderShape, ShapeKind};
use rein_collision::transform::Transform;

/// A representative shape of each kind, roughly one unit across.
pub fn shape_of(kind: ShapeKind) -> ColliderShape {
    match kind {
        ShapeKind::Aabb => ColliderShape::Aabb {
            half_extents: Vec3::splat(1.0),
        },
        ShapeKind::Obb => ColliderShape::Obb {
            half_extents: Vec3::new(1.0, 0.5, 0.75),
        },
        ShapeKind::Sphere => ColliderShape::Sphere { radius: 1.0 },
        ShapeKind::Capsule => ColliderShape::Capsule {
            radius: 0.5,
            half_height: 1.0,
        },
    }
}

/// Placement of the second operand of a pair benchmark.
///
/// `overlapping` puts it close enough for every kind combination to touch.
pub fn second_transform(overlapping: bool) -> Transform {
    let x = if overlapping { 1.2 } else { 6.0 };
    Transform::from_position_rotation(Vec3::new(x, 0.2, 0.1), Quat::from_rotation_y(0.4))
}

// ---------------------------------------------------------------------------
// World scenes
// ---------------------------------------------------------------------------

/// Spawn `n` colliders cycling through every shape kind in a grid layout
/// dense enough that neighbours overlap.
#[allow(clippy::manual_is_multiple_of)]
pub fn setup_mixed_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 1.5;
        let z = (i / cols) as f32 * 1.5;
        let kind = ShapeKind::ALL[i % ShapeKind::ALL.len()];
        let layers = if i % 2 == 0 {
            CollisionLayers::DYNAMIC | CollisionLayers::PICKABLE
        } else {
            CollisionLayers::STATIC
        };

        world.spawn((
            Transform::from_position_rotation(
                Vec3::new(x, 0.0, z),
                Quat::from_rotation_y(i as f32 * 0.3),
            ),
            Collider::new(shape_of(kind)).with_layers(layers),
        ));
    }
    world
}

/// Brute-force candidate pairs between neighbours closer than `range`.
pub fn candidate_pairs(world: &hecs::World, range: f32) -> Vec<(hecs::Entity, hecs::Entity)> {
    let placed: Vec<(hecs::Entity, Vec3)> = world
        .query::<&Transform>()
        .iter()
        .map(|(entity, transform)| (entity, transform.position))
        .collect();

    let mut pairs = Vec::new();
    for (i, &(a, pa)) in placed.iter().enumerate() {
        for &(b, pb) in &placed[i + 1..] {
            if pa.distance(pb) < range {
                pairs.push((a, b));
            }
        }
    }
    pairs
}
