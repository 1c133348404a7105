// Copyright 2024 the Hyperspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of curve evaluation and point projection.

#![expect(missing_docs, reason = "criterion emits undocumented functions")]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use hyperspline::{NurbsCurve, Point, ProjectionOpts};

fn wavy() -> NurbsCurve {
    NurbsCurve::new(
        vec![0.0, 0.0, 0.0, 0.0, 0.3, 0.7, 1.0, 1.0, 1.0, 1.0],
        vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 40.0),
            Point::new(50.0, -10.0),
            Point::new(80.0, 30.0),
            Point::new(100.0, 50.0),
            Point::new(120.0, 0.0),
        ],
        vec![1.0, 0.8, 1.2, 1.0, 2.0, 1.0],
        0.0,
    )
    .unwrap()
}

fn bench_eval(cc: &mut Criterion) {
    let c = wavy();
    cc.bench_function("eval", |bb| {
        bb.iter(|| c.eval(black_box(0.42)));
    });
    for order in [1, 2, 3] {
        cc.bench_with_input(BenchmarkId::new("derivatives", order), &order, |bb, order| {
            bb.iter(|| c.derivatives(*order, black_box(0.42)));
        });
    }
}

fn bench_project(cc: &mut Criterion) {
    let c = wavy();
    let p = Point::new(60.0, 20.0);

    for samples in [100, 1000, 5000] {
        let opts = ProjectionOpts {
            samples,
            ..ProjectionOpts::default()
        };
        cc.bench_with_input(
            BenchmarkId::new("project", samples),
            &opts,
            |bb, opts| {
                bb.iter(|| c.project_with(black_box(p), opts));
            },
        );
    }
}

fn bench_refine(cc: &mut Criterion) {
    let c = wavy();
    let new_knots: Vec<f64> = (1..20).map(|i| f64::from(i) / 20.0).collect();
    cc.bench_function("refine 19 knots", |bb| {
        bb.iter(|| c.with_refined_knots(black_box(&new_knots)));
    });
}

criterion_group!(benches, bench_eval, bench_project, bench_refine);
criterion_main!(benches);
