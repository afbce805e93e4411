// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use geomap_geometry::{
    CIRCLE_SAMPLE_COUNT, StrokeStyle, clip_path_to_rect, clip_polygon_to_rect, peripheral_points,
    stroke_path,
};
use geomap_projection::GeoCoordinate;
use kurbo::{BezPath, Point, Rect};

/// A zig-zag that crosses the clip rect's left and right edges on every
/// segment.
fn zigzag(n: usize) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((-50.0, 0.0));
    for i in 1..n {
        let x = if i % 2 == 0 { -50.0 } else { 550.0 };
        path.line_to((x, i as f64 * 4.0));
    }
    path
}

fn star(n: usize, center: Point, r0: f64, r1: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * core::f64::consts::TAU;
            let r = if i % 2 == 0 { r0 } else { r1 };
            center + kurbo::Vec2::from_angle(a) * r
        })
        .collect()
}

fn bench_circle(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/peripheral_points");
    for steps in [CIRCLE_SAMPLE_COUNT, 1_000] {
        group.throughput(Throughput::Elements(steps as u64));
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            let center = GeoCoordinate::new(48.0, 11.0);
            b.iter(|| black_box(peripheral_points(black_box(center), 25_000.0, steps)));
        });
    }
    group.finish();
}

fn bench_clip(c: &mut Criterion) {
    let rect = Rect::new(0.0, 0.0, 500.0, 400.0);

    let mut group = c.benchmark_group("geometry/clip_path_to_rect");
    for n in [64usize, 1_024] {
        let path = zigzag(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &path, |b, path| {
            b.iter(|| black_box(clip_path_to_rect(path, rect)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("geometry/clip_polygon_to_rect");
    for n in [64usize, 1_024] {
        let ring = star(n, Point::new(250.0, 200.0), 320.0, 120.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &ring, |b, ring| {
            b.iter(|| black_box(clip_polygon_to_rect(ring, rect)));
        });
    }
    group.finish();
}

fn bench_stroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/stroke_path");
    let style = StrokeStyle::new(3.0);
    for n in [64usize, 1_024] {
        let path = zigzag(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &path, |b, path| {
            b.iter(|| black_box(stroke_path(path, &style)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_circle, bench_clip, bench_stroke);
criterion_main!(benches);
