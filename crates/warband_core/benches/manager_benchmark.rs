//! # Entity Component Manager Benchmark
//!
//! ARCHITECT'S REQUIREMENTS:
//! - Archetype queries stay O(live entities)
//! - Fork/merge moves records without per-entity reallocation
//!
//! Run with: `cargo bench --package warband_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use warband_core::{
    CommanderComponent, ComponentKind, Entity, EntityComponentManager, ExperienceComponent,
    FormComponent, UnitComponent,
};

/// Entity count for the steady-state benchmarks.
const ENTITY_COUNT: u32 = 50_000;

/// Spawns `count` units, giving every eighth one a commander record.
fn populate(manager: &mut EntityComponentManager, count: u32) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(count as usize);
    for i in 0..count {
        let entity = manager.create_entity();
        let id = (i % u32::from(u16::MAX - 1)) as u16 + 1;
        manager.attach(entity, UnitComponent { prototype: id, form: id });
        manager.attach(entity, FormComponent { body: 1, attributes: id });
        manager.attach(entity, ExperienceComponent { xp: id, level: 1 });
        if i % 8 == 0 {
            manager.attach(entity, CommanderComponent { command: 3, morale: 0 });
        }
        spawned.push(entity);
    }
    spawned
}

/// Benchmark: spawn with full component loadouts.
fn bench_spawn(c: &mut Criterion) {
    c.bench_function("manager_spawn_50K", |b| {
        b.iter(|| {
            let mut manager = EntityComponentManager::new(ENTITY_COUNT + 1);
            populate(&mut manager, ENTITY_COUNT);
            black_box(manager.len())
        });
    });
}

/// Benchmark: archetype queries at two selectivities.
fn bench_query(c: &mut Criterion) {
    let mut manager = EntityComponentManager::new(ENTITY_COUNT + 1);
    populate(&mut manager, ENTITY_COUNT);

    let mut group = c.benchmark_group("manager_query");

    group.bench_function("all_units", |b| {
        b.iter(|| black_box(manager.entities_with(&[ComponentKind::Unit])).len());
    });

    group.bench_function("commanders_only", |b| {
        b.iter(|| {
            black_box(
                manager.entities_with(&[ComponentKind::Unit, ComponentKind::Commander]),
            )
            .len()
        });
    });

    group.finish();
}

/// Benchmark: has-component fast path via the archetype mask.
fn bench_has(c: &mut Criterion) {
    let mut manager = EntityComponentManager::new(ENTITY_COUNT + 1);
    let entities = populate(&mut manager, ENTITY_COUNT);

    c.bench_function("manager_has_50K", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for &entity in &entities {
                if manager.has(entity, ComponentKind::Commander) {
                    hits += 1;
                }
            }
            black_box(hits)
        });
    });
}

/// Benchmark: fork a battle-sized subset out and merge it back.
fn bench_fork_merge(c: &mut Criterion) {
    c.bench_function("manager_fork_merge_1K_of_50K", |b| {
        let mut manager = EntityComponentManager::new(ENTITY_COUNT * 2);
        populate(&mut manager, ENTITY_COUNT);
        b.iter(|| {
            let engaged: Vec<Entity> = manager
                .entities_with(&[ComponentKind::Unit, ComponentKind::Commander])
                .into_iter()
                .take(1_000)
                .collect();
            let mut battle = manager.fork_sub_manager(2_048, &engaged);
            manager.merge_sub_manager(&mut battle);
            black_box(manager.len())
        });
    });
}

criterion_group!(benches, bench_spawn, bench_query, bench_has, bench_fork_merge);

criterion_main!(benches);
