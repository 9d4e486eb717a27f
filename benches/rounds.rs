use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rankflow::{Engine, EngineConfig, IterationDriver, PageState, PartitionedCollection};

const NUM_PAGES: usize = 10_000;
const LINKS_PER_PAGE: usize = 8;
const ROUNDS: usize = 5;

fn random_graph(engine: &Engine) -> PartitionedCollection<String, PageState> {
    let mut rng = SmallRng::seed_from_u64(42);
    let records = (0..NUM_PAGES).map(|i| {
        let neighbors = (0..LINKS_PER_PAGE)
            .map(|_| format!("p{}", rng.random_range(0..NUM_PAGES)))
            .collect();
        (
            format!("p{i}"),
            PageState {
                rank: 1.0,
                neighbors,
            },
        )
    });
    PartitionedCollection::from_records(records, engine.partitioner().clone())
}

fn bench_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank");
    group.throughput(Throughput::Elements((NUM_PAGES * ROUNDS) as u64));
    for partitions in [1, 4, 8] {
        group.bench_function(format!("{ROUNDS}-rounds-{partitions}p"), |b| {
            let engine = Engine::new(EngineConfig::local(partitions));
            let initial = random_graph(&engine);
            b.iter(|| {
                let mut driver =
                    IterationDriver::new(engine.clone(), initial.clone(), ROUNDS);
                driver.run_to_completion().unwrap();
                black_box(driver.into_collection())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rounds);
criterion_main!(benches);
