// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `geomap_items` crate.
//!
//! These drive items through a [`GeoMap`], with a focus on how camera
//! changes, edits, drags and render syncs interact with the dirty flags.

use geomap_items::{
    CircleItem, GeoMap, GeoMapItem, LineProperties, MapItem, PolygonItem, PolylineItem,
    QuickItem, RectangleItem,
};
use geomap_projection::{GeoCoordinate, GeoProjection};
use kurbo::{Point, Size, Vec2};
use peniko::Color;

fn c(lat: f64, lon: f64) -> GeoCoordinate {
    GeoCoordinate::new(lat, lon)
}

fn map() -> GeoMap {
    let mut map = GeoMap::new(Size::new(640.0, 480.0));
    map.set_zoom_level(4.0);
    map
}

fn fill_geometry(item: &MapItem) -> &geomap_geometry::MapItemGeometry {
    match item {
        MapItem::Circle(c) => c.fill_geometry(),
        MapItem::Polygon(p) => p.fill_geometry(),
        MapItem::Rectangle(r) => r.fill_geometry(),
        MapItem::Polyline(l) => l.geometry(),
        other => panic!("no fill geometry on {other:?}"),
    }
}

#[test]
fn pan_keeps_source_and_zoom_rebuilds_it() {
    let mut map = map();
    let id = map.add_map_item(PolygonItem::new(vec![c(2.0, -2.0), c(2.0, 2.0), c(-2.0, 0.0)]));
    map.sync_nodes();
    assert!(!fill_geometry(map.item(id).unwrap()).is_source_dirty());

    map.pan_by(Vec2::new(30.0, 10.0));
    let g = fill_geometry(map.item(id).unwrap());
    assert!(g.is_screen_dirty());
    assert!(!g.is_source_dirty());
    map.sync_nodes();

    map.set_zoom_level(5.0);
    let g = fill_geometry(map.item(id).unwrap());
    assert!(g.is_source_dirty());
    assert!(g.is_screen_dirty());
}

#[test]
fn small_tilt_keeps_source_large_tilt_rebuilds_it() {
    let mut map = map();
    let id = map.add_map_item(PolylineItem::new(vec![c(0.0, -3.0), c(0.0, 3.0)]));
    map.sync_nodes();

    map.set_tilt(0.05);
    assert!(!fill_geometry(map.item(id).unwrap()).is_source_dirty());
    map.set_tilt(10.0);
    assert!(fill_geometry(map.item(id).unwrap()).is_source_dirty());
}

#[test]
fn bearing_rotates_the_geometry() {
    let mut map = map();
    let id = map.add_map_item(PolylineItem::new(vec![c(0.0, -3.0), c(0.0, 3.0)]));
    let flat = map.item(id).unwrap().bounding_box_on_screen();
    assert!(flat.width() > flat.height() * 4.0);

    map.set_bearing(90.0);
    let turned = map.item(id).unwrap().bounding_box_on_screen();
    assert!(turned.height() > turned.width() * 4.0, "{turned:?}");
}

#[test]
fn removed_items_are_detached() {
    let mut map = map();
    let id = map.add_map_item(CircleItem::new(c(0.0, 0.0), 100_000.0));
    map.sync_nodes();
    assert_eq!(map.nodes(id).len(), 2);

    let mut item = map.remove_map_item(id).unwrap();
    assert!(!item.base().is_attached());
    assert!(!item.is_visible());
    assert!(map.nodes(id).is_empty());
    assert!(map.map_items().is_empty());

    // A detached item ignores updates.
    let before = item.base().position();
    item.update_map_item(map.projection());
    assert_eq!(item.base().position(), before);

    // Adding it again recomputes everything.
    let id = map.add_map_item(item);
    assert!(map.item(id).unwrap().is_visible());
    assert!(fill_geometry(map.item(id).unwrap()).is_source_dirty());
}

#[test]
fn editing_through_the_map_updates_geometry() {
    let mut map = map();
    let id = map.add_map_item(PolylineItem::new(vec![c(0.0, -3.0), c(0.0, 3.0)]));
    let short = map.item(id).unwrap().bounding_box_on_screen().width();

    map.edit_item(id, |item| {
        if let MapItem::Polyline(line) = item {
            line.add_coordinate(c(0.0, 6.0));
        }
    });
    let long = map.item(id).unwrap().bounding_box_on_screen().width();
    assert!(long > short * 1.4, "{short} -> {long}");
}

#[test]
fn hit_test_prefers_the_latest_item() {
    let mut map = map();
    let below = map.add_map_item(CircleItem::new(c(0.0, 0.0), 300_000.0));
    let above = map.add_map_item(RectangleItem::new(c(1.0, -1.0), c(-1.0, 1.0)));
    let center = Point::new(320.0, 240.0);
    assert_eq!(map.hit_test(center), Some(above));

    let edge = map.projection().coordinate_to_screen(c(0.0, 2.0), false);
    assert_eq!(map.hit_test(edge), Some(below));
    assert_eq!(map.hit_test(Point::new(5.0, 5.0)), None);
}

#[test]
fn refused_drag_snaps_back() {
    let mut map = map();
    let id = map.add_map_item(PolylineItem::new(vec![c(0.0, -3.0), c(0.0, 3.0)]));
    let home = map.item(id).unwrap().base().position();

    assert!(map.drag_item(id, Vec2::new(40.0, 40.0)));
    assert_ne!(map.item(id).unwrap().base().position(), home);
    assert!(!map.end_drag(id));
    let back = map.item(id).unwrap().base().position();
    assert!((back - home).hypot() < 1e-9);
}

#[test]
fn accepted_drag_moves_the_circle() {
    let mut map = map();
    let id = map.add_map_item(CircleItem::new(c(0.0, 0.0), 300_000.0));
    let before = map.item(id).unwrap().bounding_box_on_screen();

    map.drag_item(id, Vec2::new(0.0, -45.5));
    assert!(map.end_drag(id));
    let MapItem::Circle(circle) = map.item(id).unwrap() else {
        panic!("circle expected");
    };
    assert!(circle.center().latitude > 3.0, "{:?}", circle.center());

    let after = map.item(id).unwrap().bounding_box_on_screen();
    assert!((before.y0 - after.y0 - 45.5).abs() < 1.5, "{before:?} -> {after:?}");
}

#[test]
fn invisible_border_is_not_rendered() {
    let mut map = map();
    let mut rect = RectangleItem::new(c(2.0, -2.0), c(-2.0, 2.0));
    rect.set_color(Color::WHITE);
    rect.set_border(LineProperties::new(3.0, Color::TRANSPARENT));
    let id = map.add_map_item(rect);
    map.sync_nodes();

    let nodes = map.nodes(id);
    assert_eq!(nodes.len(), 2);
    assert!(!nodes[0].is_empty());
    assert!(nodes[1].is_empty());
}

#[test]
fn off_screen_items_are_invisible() {
    let mut map = map();
    let id = map.add_map_item(CircleItem::new(c(0.0, 60.0), 50_000.0));
    assert!(!map.item(id).unwrap().is_visible());

    map.set_center(c(0.0, 60.0));
    assert!(map.item(id).unwrap().is_visible());
}

#[test]
fn fit_zooms_to_the_items() {
    let mut map = GeoMap::new(Size::new(400.0, 400.0));
    map.set_zoom_level(2.0);
    map.add_map_item(RectangleItem::new(c(12.0, 8.0), c(8.0, 12.0)));
    map.add_map_item(CircleItem::new(c(10.0, 10.0), 50_000.0));
    map.fit_viewport_to_map_items();

    let camera = map.camera();
    assert!((camera.center.latitude - 10.0).abs() < 0.5, "{camera:?}");
    assert!((camera.center.longitude - 10.0).abs() < 0.5, "{camera:?}");
    assert!(camera.zoom_level > 2.0);
    assert_eq!(camera.zoom_level, camera.zoom_level.floor());

    for (_, item) in map.map_items().iter() {
        assert!(item.is_visible());
        let b = item.bounding_box_on_screen();
        assert!(b.x0 >= 0.0 && b.x1 <= 400.0, "{b:?}");
    }
}

#[test]
fn fit_with_a_point_item_only_recenters() {
    let mut map = GeoMap::new(Size::new(400.0, 400.0));
    map.set_zoom_level(3.0);
    map.add_map_item(QuickItem::new(c(-5.0, 7.0), Size::ZERO));
    map.fit_viewport_to_map_items();

    let camera = map.camera();
    assert!((camera.center.latitude + 5.0).abs() < 1e-6);
    assert!((camera.center.longitude - 7.0).abs() < 1e-6);
    assert_eq!(camera.zoom_level, 3.0);
}
