// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use geomap_items::{CircleItem, GeoMap, PolygonItem, PolylineItem};
use geomap_projection::GeoCoordinate;
use kurbo::{Size, Vec2};

fn populated_map(count: usize) -> GeoMap {
    let mut map = GeoMap::new(Size::new(1280.0, 800.0));
    map.set_zoom_level(5.0);
    for i in 0..count {
        let lat = (i % 20) as f64 - 10.0;
        let lon = (i / 20) as f64 * 2.0 - 10.0;
        map.add_map_item(CircleItem::new(GeoCoordinate::new(lat, lon), 40_000.0));
        map.add_map_item(PolygonItem::new(vec![
            GeoCoordinate::new(lat, lon),
            GeoCoordinate::new(lat + 0.5, lon + 0.5),
            GeoCoordinate::new(lat, lon + 1.0),
        ]));
        map.add_map_item(PolylineItem::new(vec![
            GeoCoordinate::new(lat - 0.5, lon),
            GeoCoordinate::new(lat - 0.2, lon + 0.7),
            GeoCoordinate::new(lat - 0.5, lon + 1.4),
        ]));
    }
    map.sync_nodes();
    map
}

fn bench_viewport_changes(c: &mut Criterion) {
    let mut group = c.benchmark_group("items/viewport");

    // A pan only redoes the screen step; a zoom redoes both steps.
    group.bench_function("pan", |b| {
        b.iter_batched(
            || populated_map(100),
            |mut map| {
                map.pan_by(Vec2::new(7.0, -3.0));
                black_box(map.sync_nodes());
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("zoom", |b| {
        b.iter_batched(
            || populated_map(100),
            |mut map| {
                map.set_zoom_level(5.5);
                black_box(map.sync_nodes());
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("fit", |b| {
        b.iter_batched(
            || populated_map(100),
            |mut map| {
                map.fit_viewport_to_map_items();
                black_box(map.camera());
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_viewport_changes);
criterion_main!(benches);
