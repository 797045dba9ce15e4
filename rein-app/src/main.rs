use glam::{Quat, Vec2, Vec3};
use rein_collision::ecs::components::physics::{Collider, CollisionLayers};
use rein_collision::ecs::systems::{detect_contacts, raycast, raycast_all, RaycastQuery};
use rein_collision::physics::collider::ColliderShape;
use rein_collision::physics::CollisionConfig;
use rein_collision::picking::{
    ray_from_screen, ray_from_viewport_center, PerspectiveCamera, PickingConfig, Viewport,
};
use rein_collision::transform::Transform;

/// One collider of every kind, lined up along X so neighbours touch.
fn build_scene(world: &mut hecs::World) -> anyhow::Result<Vec<hecs::Entity>> {
    let pickable = CollisionLayers::DYNAMIC | CollisionLayers::PICKABLE;
    let entities = vec![
        world.spawn((
            Transform::from_position(Vec3::new(-3.0, 0.0, 0.0)),
            Collider::new(ColliderShape::aabb(Vec3::splat(1.0))?)
                .with_layers(CollisionLayers::STATIC),
        )),
        world.spawn((
            Transform::from_position_rotation(
                Vec3::new(-1.2, 0.3, 0.0),
                Quat::from_rotation_y(0.6),
            ),
            Collider::new(ColliderShape::obb(Vec3::new(0.8, 0.8, 0.5))?).with_layers(pickable),
        )),
        world.spawn((
            Transform::from_position(Vec3::new(0.4, 0.0, 0.0)),
            Collider::new(ColliderShape::sphere(0.9)?).with_layers(pickable),
        )),
        world.spawn((
            Transform::from_position_rotation(
                Vec3::new(1.8, 0.0, 0.0),
                Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            ),
            Collider::new(ColliderShape::capsule(0.5, 0.8)?).with_layers(pickable),
        )),
    ];
    Ok(entities)
}

/// Every unordered pair, standing in for a broad phase.
fn all_pairs(entities: &[hecs::Entity]) -> Vec<(hecs::Entity, hecs::Entity)> {
    let mut pairs = Vec::new();
    for (i, &a) in entities.iter().enumerate() {
        for &b in &entities[i + 1..] {
            pairs.push((a, b));
        }
    }
    pairs
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut world = hecs::World::new();
    let entities = build_scene(&mut world)?;

    let collision_config = CollisionConfig::default();
    collision_config.validate()?;

    let manifolds = detect_contacts(&world, &all_pairs(&entities), &collision_config);
    for manifold in &manifolds {
        if let Some(contact) = manifold.deepest() {
            log::info!(
                "contact {:?} -> {:?}: normal {:?}, penetration {:.3}",
                manifold.entity_a,
                manifold.entity_b,
                contact.normal,
                contact.penetration
            );
        }
    }

    let camera = PerspectiveCamera::new(Vec3::new(0.0, 1.0, 8.0), -5.0, 0.0, 60.0, 0.1, 100.0)?;
    let viewport = Viewport::new(0, 0, 1280, 720)?;
    let picking_config = PickingConfig::default();
    picking_config.validate()?;

    let center = ray_from_viewport_center(&camera, &viewport, &picking_config)
        .ok_or_else(|| anyhow::anyhow!("degenerate centre ray"))?;
    let query = RaycastQuery::new(center).with_layers(CollisionLayers::PICKABLE);
    match raycast(&world, &query, &collision_config) {
        Some(hit) => log::info!(
            "crosshair picks {:?} at {:?} ({:.3} units)",
            hit.entity,
            hit.point,
            hit.distance
        ),
        None => log::info!("crosshair picks nothing"),
    }

    let cursor = Vec2::new(400.0, 360.0);
    if let Some(ray) = ray_from_screen(&camera, &viewport, cursor, &picking_config) {
        let hits = raycast_all(&world, &RaycastQuery::new(ray), &collision_config);
        log::info!("cursor {:?} crosses {} collider(s)", cursor, hits.len());
        for hit in hits {
            log::debug!("  {:?} at {:.3}", hit.entity, hit.distance);
        }
    }

    Ok(())
}
