//! Ray queries against every collider in a world.

use glam::Vec3;
use hecs::Entity;
use tracing::debug;

use crate::ecs::components::physics::{Collider, CollisionLayers};
use crate::physics::ray::{ray_intersection_with_tolerance, Ray};
use crate::physics::CollisionConfig;
use crate::transform::Transform;

/// A ray together with the filters applied to the entities it may hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastQuery {
    pub ray: Ray,
    /// Only colliders sharing at least one of these layers are tested.
    pub layers: CollisionLayers,
    /// Entity never reported, usually the one casting the ray.
    pub ignore: Option<Entity>,
    pub max_distance: Option<f32>,
}

impl RaycastQuery {
    /// Query against every layer with no exclusions.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            layers: CollisionLayers::ALL,
            ignore: None,
            max_distance: None,
        }
    }

    pub fn with_layers(mut self, layers: CollisionLayers) -> Self {
        self.layers = layers;
        self
    }

    pub fn ignoring(mut self, entity: Entity) -> Self {
        self.ignore = Some(entity);
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    fn accepts(&self, entity: Entity, collider: &Collider) -> bool {
        self.ignore != Some(entity) && collider.layers.intersects(self.layers)
    }
}

/// An entity struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    /// Distance along the ray. Negative when the origin is inside a sphere
    /// or capsule whose centre lies ahead of it.
    pub distance: f32,
}

/// Every hit of the query, nearest first.
pub fn raycast_all(
    world: &hecs::World,
    query: &RaycastQuery,
    config: &CollisionConfig,
) -> Vec<RayHit> {
    let mut candidates = world.query::<(&Collider, &Transform)>();
    let mut tested = 0usize;
    let mut hits: Vec<RayHit> = candidates
        .iter()
        .filter(|(entity, (collider, _))| query.accepts(*entity, collider))
        .filter_map(|(entity, (collider, transform))| {
            tested += 1;
            let hit = ray_intersection_with_tolerance(
                &query.ray,
                &collider.shape,
                &collider.world_transform(transform),
                config.ray_box_epsilon,
            )?;
            if query.max_distance.is_some_and(|max| hit.distance > max) {
                return None;
            }
            Some(RayHit {
                entity,
                point: hit.point,
                distance: hit.distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    debug!(tested, hits = hits.len(), "raycast");
    hits
}

/// The nearest hit of the query.
pub fn raycast(
    world: &hecs::World,
    query: &RaycastQuery,
    config: &CollisionConfig,
) -> Option<RayHit> {
    raycast_all(world, query, config).into_iter().next()
}
