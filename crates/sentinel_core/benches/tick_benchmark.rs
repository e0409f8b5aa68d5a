//! Benchmark for the per-frame watcher tick.
//!
//! TARGET: 1,000 watchers in well under a millisecond
//!
//! Run with: cargo bench --package sentinel_core --bench tick_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sentinel_core::{
    can_see, tick, Facing, MockWorld, Pose, ReactionDescriptor, RecordingStore, StateKey, Target,
    TilePos, VisionCone, Watcher, WatcherId, WatcherProfile, WatcherRegistry,
};

const WATCHERS: u32 = 1_000;

fn create_patrol() -> (WatcherRegistry, MockWorld) {
    let mut registry = WatcherRegistry::new();
    let mut world = MockWorld::new();
    let facings = [Facing::Down, Facing::Left, Facing::Right, Facing::Up];

    for i in 0..WATCHERS {
        let id = WatcherId::new(i + 1);
        let profile = WatcherProfile::new(VisionCone::new(2, 7))
            .with_reaction(ReactionDescriptor::LocalFlag { flag: StateKey::name("A") });
        registry.add(Watcher::new(id, profile));

        let x = (i % 40) as i32 * 3;
        let y = (i / 40) as i32 * 3;
        world.place(id, Pose::new(TilePos::new(x, y), facings[(i % 4) as usize]));
    }
    world.set_target(Some(Target::at(TilePos::new(60, 37))));
    (registry, world)
}

fn benchmark_vision_test(c: &mut Criterion) {
    let pose = Pose::new(TilePos::new(10, 10), Facing::Up);
    let cone = VisionCone::new(2, 7);

    c.bench_function("single_vision_test", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = i.wrapping_add(1);
            let target = Target::at(TilePos::new(10 + (i & 3), 10 + (i & 7)));
            black_box(can_see(black_box(pose), black_box(cone), &target))
        });
    });
}

fn benchmark_tick(c: &mut Criterion) {
    let (registry, world) = create_patrol();

    let mut group = c.benchmark_group("tick");
    group.throughput(Throughput::Elements(u64::from(WATCHERS)));

    // Latches fill up after the first frame, so this measures the steady state.
    group.bench_function("1k_watchers", |b| {
        let mut registry = registry.clone();
        let mut store = RecordingStore::new();
        b.iter(|| black_box(tick(&mut registry, &world, &mut store)));
    });

    group.bench_function("1k_watchers_rearmed", |b| {
        b.iter_batched(
            || (registry.clone(), RecordingStore::new()),
            |(mut registry, mut store)| black_box(tick(&mut registry, &world, &mut store)),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benchmark_vision_test, benchmark_tick);
criterion_main!(benches);
