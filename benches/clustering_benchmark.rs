//! Benchmarks for classification and zone clustering.

use connectivity_planner::{
    AppConfig, GeoPoint, Measurement, Planner, RuralityClassifier, ZoneClusterer,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn synthetic_batch(n: usize) -> Vec<GeoPoint> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| {
            let measurement = Measurement::new(
                rng.gen_range(5.0..250.0),
                rng.gen_range(0.5..25.0),
                rng.gen_range(15.0..700.0),
            )
            .with_jitter(rng.gen_range(0.0..40.0))
            .with_packet_loss(rng.gen_range(0.0..6.0));
            GeoPoint::new(rng.gen_range(-33.0..5.0), rng.gen_range(-73.0..-35.0))
                .with_measurement(measurement)
        })
        .collect()
}

fn benchmark_planning(c: &mut Criterion) {
    let config = AppConfig::default();
    let planner = Planner::from_config(config.clone()).expect("default config is valid");
    let classifier = RuralityClassifier::from_config(&config).expect("preset resolves");
    let clusterer = ZoneClusterer::from_config(&config);

    let mut group = c.benchmark_group("planning");
    for size in [100usize, 1_000, 5_000] {
        let mut points = synthetic_batch(size);
        planner.prepare(&mut points);
        let enriched = classifier.classify(&points);

        group.bench_with_input(BenchmarkId::new("classify", size), &points, |b, points| {
            b.iter(|| black_box(classifier.classify(black_box(points))));
        });
        group.bench_with_input(
            BenchmarkId::new("expansion_zones", size),
            &enriched,
            |b, enriched| {
                b.iter(|| black_box(clusterer.expansion_zones(black_box(enriched))));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_planning);
criterion_main!(benches);
