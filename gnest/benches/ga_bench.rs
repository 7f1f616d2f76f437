use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gnest::config::GAConfig;
use gnest::opt::GAOptimizer;
use rand::prelude::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shelfnest::entities::Item;
use shelfnest::geometry::primitives::Polygon;
use shelfnest::packing::{PackerConfig, RotationMode, ShelfPacker};

criterion_main!(benches);
criterion_group!(benches, shelf_pack_bench, ga_bench);

const N_ITEMS: [usize; 3] = [10, 100, 1000];

fn random_items(n: usize, rng: &mut SmallRng) -> Vec<Item> {
    (0..n)
        .map(|i| {
            let (w, h) = (rng.random_range(5.0..60.0), rng.random_range(5.0..60.0));
            let triangle = Polygon::new(vec![(0.0, 0.0).into(), (w, 0.0).into(), (w / 2.0, h).into()])
                .expect("valid triangle");
            Item::new(i, format!("item_{i}"), triangle)
        })
        .collect()
}

/// How fast a single ordering is packed, the fitness function of the genetic search.
fn shelf_pack_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("shelf_pack");
    for n in N_ITEMS {
        let mut rng = SmallRng::seed_from_u64(0);
        let items = random_items(n, &mut rng);
        let packer = ShelfPacker::new(PackerConfig {
            bin_width: 1000.0,
            rotation: RotationMode::Discrete(4),
            ..PackerConfig::default()
        });
        let mut order: Vec<usize> = (0..n).collect();
        let angles = vec![90.0; n];

        group.throughput(criterion::Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                order.shuffle(&mut rng);
                packer.pack_rotated(&items, &order, &angles).area()
            })
        });
    }
    group.finish();
}

/// A complete (short) run of the genetic search.
fn ga_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_solve");
    group.sample_size(10);
    for n in [10, 100] {
        let items = random_items(n, &mut SmallRng::seed_from_u64(0));
        let config = GAConfig {
            n_generations: 20,
            ..GAConfig::default()
        };
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                GAOptimizer::new(items.clone(), config, SmallRng::seed_from_u64(0))
                    .expect("valid config")
                    .solve()
                    .fitness
            })
        });
    }
    group.finish();
}
