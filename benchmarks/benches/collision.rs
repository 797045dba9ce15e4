//! Collision benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench collision
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench collision -- raycast

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use rein_collision::ecs::systems::{detect_contacts, raycast, RaycastQuery};
use rein_collision::physics::collider::ShapeKind;
use rein_collision::physics::dispatch::{detect_collision, PairKind};
use rein_collision::physics::ray::{ray_intersection, Ray};
use rein_collision::physics::CollisionConfig;
use rein_collision::picking::{ray_from_screen, PerspectiveCamera, PickingConfig, Viewport};
use rein_collision::transform::Transform;
use rein_collision_bench::*;

// ---------------------------------------------------------------------------
// Narrowphase
// ---------------------------------------------------------------------------

fn bench_narrowphase(c: &mut Criterion) {
    let ta = Transform::identity();
    let tb_hit = second_transform(true);
    let tb_miss = second_transform(false);

    for (i, &a) in ShapeKind::ALL.iter().enumerate() {
        for &b in &ShapeKind::ALL[i..] {
            let (sa, sb) = (shape_of(a), shape_of(b));
            let mut group = c.benchmark_group(format!("narrowphase/{:?}", PairKind::of(a, b)));
            group.bench_function("intersecting", |bench| {
                bench.iter(|| detect_collision(&sa, &ta, &sb, &tb_hit));
            });
            group.bench_function("separated", |bench| {
                bench.iter(|| detect_collision(&sa, &ta, &sb, &tb_miss));
            });
            group.finish();
        }
    }
}

// ---------------------------------------------------------------------------
// Ray tests
// ---------------------------------------------------------------------------

fn bench_raycast(c: &mut Criterion) {
    let transform = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));
    let hit = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::Z);
    let miss = Ray::new(Vec3::new(4.0, 0.0, 0.0), Vec3::Z);

    for kind in ShapeKind::ALL {
        let shape = shape_of(kind);
        let mut group = c.benchmark_group(format!("raycast/{kind:?}"));
        group.bench_function("hit", |b| {
            b.iter(|| ray_intersection(&hit, &shape, &transform));
        });
        group.bench_function("miss", |b| {
            b.iter(|| ray_intersection(&miss, &shape, &transform));
        });
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Picking
// ---------------------------------------------------------------------------

fn bench_picking(c: &mut Criterion) {
    let camera = PerspectiveCamera::new(Vec3::new(0.0, 2.0, 10.0), -15.0, 20.0, 60.0, 0.1, 500.0)
        .expect("valid camera");
    let viewport = Viewport::new(0, 0, 1920, 1080).expect("valid viewport");
    let config = PickingConfig::default();

    let mut group = c.benchmark_group("picking");
    group.bench_function("ray_from_screen", |b| {
        b.iter(|| ray_from_screen(&camera, &viewport, Vec2::new(640.0, 300.0), &config));
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// World passes
// ---------------------------------------------------------------------------

fn bench_world(c: &mut Criterion) {
    let config = CollisionConfig::default();

    {
        let mut group = c.benchmark_group("world/detect_contacts");
        for &n in &[100, 500, 1000] {
            let world = setup_mixed_world(n);
            let pairs = candidate_pairs(&world, 3.0);
            group.bench_with_input(BenchmarkId::from_parameter(n), &pairs, |b, pairs| {
                b.iter(|| detect_contacts(&world, pairs, &config));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("world/raycast");
        for &n in &[100, 500, 1000] {
            let world = setup_mixed_world(n);
            let query = RaycastQuery::new(Ray::new(Vec3::new(-5.0, 0.0, 0.3), Vec3::X));
            group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
                b.iter(|| raycast(&world, query, &config));
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_narrowphase,
    bench_raycast,
    bench_picking,
    bench_world,
);
criterion_main!(benches);
