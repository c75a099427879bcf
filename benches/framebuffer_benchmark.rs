#![allow(clippy::unwrap_used, missing_docs)]
//! Benchmark for framebuffer operations on the streamed canvas size.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use livegraph::color::Rgb;
use livegraph::framebuffer::Framebuffer;
use livegraph::output::PngEncoder;
use std::hint::black_box;

fn framebuffer_clear_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("framebuffer_clear");

    for (width, height) in [(320, 240), (640, 480), (1280, 720)] {
        let mut fb = Framebuffer::new(width, height).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(width, height),
            |b, _| {
                b.iter(|| {
                    fb.clear(black_box(Rgb::RED));
                });
            },
        );
    }

    group.finish();
}

fn framebuffer_blend_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("framebuffer_blend");

    let mut fb = Framebuffer::filled(320, 240, Rgb::WHITE).unwrap();

    group.bench_function("blend_pixel_320x240", |b| {
        b.iter(|| {
            for y in 0..240 {
                for x in 0..320 {
                    fb.blend_pixel(black_box(x), black_box(y), Rgb::RED, 0.5);
                }
            }
        });
    });

    group.finish();
}

fn frame_copy_benchmark(c: &mut Criterion) {
    let fb = Framebuffer::filled(320, 240, Rgb::BLUE).unwrap();

    c.bench_function("frame_clone_320x240", |b| b.iter(|| black_box(&fb).clone()));
    c.bench_function("frame_png_320x240", |b| {
        b.iter(|| PngEncoder::to_bytes(black_box(&fb)).unwrap());
    });
}

criterion_group!(benches, framebuffer_clear_benchmark, framebuffer_blend_benchmark, frame_copy_benchmark);
criterion_main!(benches);
