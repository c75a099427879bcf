#![allow(clippy::unwrap_used, missing_docs)]
//! Benchmark for background composition and overlay redraws.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use livegraph::curve::PolynomialFit;
use livegraph::graph::{compose, CanvasLayout, OverlayRenderer, TrackedPoint};
use livegraph::render::Typeface;
use livegraph::series::DataSeries;
use livegraph::style::GraphStyle;
use std::hint::black_box;

fn series(n: usize) -> DataSeries {
    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| v * v * 0.5 - v + 3.0).collect();
    DataSeries::new(x, y).unwrap()
}

fn compose_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let face = Typeface::embedded().unwrap();
    let style = GraphStyle::default();
    let layout = CanvasLayout::default();

    for n in [5, 50, 500] {
        let data = series(n);
        let curve = PolynomialFit::fit(&data, 2).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| compose(black_box(&data), &style, &curve, &layout, &face).unwrap());
        });
    }

    group.finish();
}

fn overlay_benchmark(c: &mut Criterion) {
    let face = Typeface::embedded().unwrap();
    let style = GraphStyle::default();
    let layout = CanvasLayout::default();
    let data = series(5);
    let curve = PolynomialFit::fit(&data, 2).unwrap();
    let background = compose(&data, &style, &curve, &layout, &face).unwrap();
    let renderer = OverlayRenderer::new(&background, &style, layout, face);

    c.bench_function("overlay_render", |b| {
        b.iter(|| renderer.render(black_box(TrackedPoint::new(2.5, 4.125))));
    });
}

criterion_group!(benches, compose_benchmark, overlay_benchmark);
criterion_main!(benches);
