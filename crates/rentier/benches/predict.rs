//! Prediction latency benchmarks.
//!
//! Covers the raw forest path (`predict`) and the full request pipeline
//! (`estimate_rent`) on the fixture model.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rentier::testing::fixture_model;

fn bench_predict_row(c: &mut Criterion) {
    let model = fixture_model();
    let features = [2.0, 2.0, 1000.0, 0.0, 2.0];

    c.bench_function("predict/single_row", |b| {
        b.iter(|| {
            let rent = model.predict(black_box(&features)).unwrap();
            black_box(rent)
        });
    });
}

fn bench_estimate_rent(c: &mut Criterion) {
    let model = fixture_model();

    c.bench_function("estimate/full_pipeline", |b| {
        b.iter(|| {
            let estimate = model
                .estimate_rent(
                    black_box(2),
                    black_box(2),
                    black_box(1000.0),
                    black_box("Furnished"),
                    black_box("Family"),
                )
                .unwrap();
            black_box(estimate)
        });
    });
}

criterion_group!(benches, bench_predict_row, bench_estimate_rent);

criterion_main!(benches);
