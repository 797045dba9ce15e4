//! Narrow-phase pass over candidate pairs from a broad phase.

use hecs::Entity;
use tracing::{debug, warn};

use crate::ecs::components::physics::Collider;
use crate::physics::collider::ColliderShape;
use crate::physics::contact::ContactManifold;
use crate::physics::dispatch::detect_collision;
use crate::physics::CollisionConfig;
use crate::transform::Transform;

/// Shape of an entity placed in the world, with its collider offset applied.
fn placed_shape(world: &hecs::World, entity: Entity) -> Option<(ColliderShape, Transform)> {
    let collider = world.get::<&Collider>(entity).ok()?;
    let transform = world.get::<&Transform>(entity).ok()?;
    Some((collider.shape, collider.world_transform(&transform)))
}

fn test_pair(
    world: &hecs::World,
    entity_a: Entity,
    entity_b: Entity,
) -> Option<ContactManifold<Entity>> {
    if entity_a == entity_b {
        return None;
    }
    let (Some((shape_a, transform_a)), Some((shape_b, transform_b))) =
        (placed_shape(world, entity_a), placed_shape(world, entity_b))
    else {
        warn!(?entity_a, ?entity_b, "skipping pair without Collider and Transform");
        return None;
    };

    let contact = detect_collision(&shape_a, &transform_a, &shape_b, &transform_b)?;
    Some(ContactManifold::from_contact(entity_a, entity_b, contact))
}

#[cfg(feature = "parallel")]
fn run_pairs(
    world: &hecs::World,
    pairs: &[(Entity, Entity)],
    config: &CollisionConfig,
) -> (Vec<ContactManifold<Entity>>, bool) {
    use rayon::prelude::*;

    if pairs.len() >= config.parallel_pair_threshold {
        let manifolds = pairs
            .par_iter()
            .filter_map(|&(a, b)| test_pair(world, a, b))
            .collect();
        return (manifolds, true);
    }
    (run_serial(world, pairs), false)
}

#[cfg(not(feature = "parallel"))]
fn run_pairs(
    world: &hecs::World,
    pairs: &[(Entity, Entity)],
    _config: &CollisionConfig,
) -> (Vec<ContactManifold<Entity>>, bool) {
    (run_serial(world, pairs), false)
}

fn run_serial(world: &hecs::World, pairs: &[(Entity, Entity)]) -> Vec<ContactManifold<Entity>> {
    pairs
        .iter()
        .filter_map(|&(a, b)| test_pair(world, a, b))
        .collect()
}

/// Run the narrow phase over candidate pairs.
///
/// Returns one manifold per colliding pair, in the order the pairs were
/// given, with normals pointing from the pair's first entity to its second.
/// Pairs whose entities lack a [`Collider`] or [`Transform`] are skipped.
pub fn detect_contacts(
    world: &hecs::World,
    pairs: &[(Entity, Entity)],
    config: &CollisionConfig,
) -> Vec<ContactManifold<Entity>> {
    let (manifolds, parallel) = run_pairs(world, pairs, config);
    debug!(
        pairs = pairs.len(),
        contacts = manifolds.len(),
        parallel,
        "narrowphase pass"
    );
    manifolds
}
