// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::MapItemGeometry;
use geomap_projection::{GeoCoordinate, GeoProjection, ViewportChange, wrap_longitude};
use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

use crate::item::{GeoMapItem, MapItemBase, RenderPart};
use crate::line::LineProperties;
use crate::path::GeoPath;
use crate::shape::{FillKind, ShapeGeometry};

/// A filled, closed ring of coordinates with an optional border.
#[derive(Clone, Debug)]
pub struct PolygonItem {
    base: MapItemBase,
    path: GeoPath,
    color: Color,
    border: LineProperties,
    shape: ShapeGeometry,
}

impl Default for PolygonItem {
    fn default() -> Self {
        Self {
            base: MapItemBase::default(),
            path: GeoPath::default(),
            color: Color::TRANSPARENT,
            border: LineProperties::default(),
            shape: ShapeGeometry::default(),
        }
    }
}

impl PolygonItem {
    /// Polygon with the given ring. The ring is closed implicitly.
    #[must_use]
    pub fn new(path: impl Into<GeoPath>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// The ring.
    #[must_use]
    pub fn path(&self) -> &GeoPath {
        &self.path
    }

    /// Replaces the ring.
    pub fn set_path(&mut self, coordinates: Vec<GeoCoordinate>) {
        let changed = self.path.set(coordinates);
        self.path_changed(changed);
    }

    /// Appends a coordinate.
    pub fn add_coordinate(&mut self, coordinate: GeoCoordinate) {
        let changed = self.path.push(coordinate);
        self.path_changed(changed);
    }

    /// Inserts a coordinate before `index`.
    pub fn insert_coordinate(&mut self, index: usize, coordinate: GeoCoordinate) {
        let changed = self.path.insert(index, coordinate);
        self.path_changed(changed);
    }

    /// Replaces the coordinate at `index`.
    pub fn replace_coordinate(&mut self, index: usize, coordinate: GeoCoordinate) {
        let changed = self.path.replace(index, coordinate);
        self.path_changed(changed);
    }

    /// Removes the last occurrence of `coordinate`.
    pub fn remove_coordinate(&mut self, coordinate: GeoCoordinate) {
        let changed = self.path.remove(coordinate);
        self.path_changed(changed);
    }

    /// Removes and returns the coordinate at `index`.
    pub fn remove_coordinate_at(&mut self, index: usize) -> Option<GeoCoordinate> {
        let removed = self.path.remove_at(index);
        self.path_changed(removed.is_some());
        removed
    }

    /// The coordinate at `index`.
    #[must_use]
    pub fn coordinate_at(&self, index: usize) -> Option<GeoCoordinate> {
        self.path.get(index)
    }

    /// Returns `true` if `coordinate` is on the ring.
    #[must_use]
    pub fn contains_coordinate(&self, coordinate: GeoCoordinate) -> bool {
        self.path.contains(coordinate)
    }

    /// Number of coordinates on the ring.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Fill colour.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Sets the fill colour.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Border line.
    #[must_use]
    pub fn border(&self) -> LineProperties {
        self.border
    }

    /// Sets the border line.
    pub fn set_border(&mut self, border: LineProperties) {
        let reshape =
            border.width != self.border.width || border.is_visible() != self.border.is_visible();
        self.border = border;
        if reshape {
            self.shape.mark_source_dirty();
        }
    }

    /// Fill geometry.
    #[must_use]
    pub fn fill_geometry(&self) -> &MapItemGeometry {
        self.shape.fill().geometry()
    }

    /// Border geometry.
    #[must_use]
    pub fn border_geometry(&self) -> &MapItemGeometry {
        self.shape.border().geometry()
    }

    fn path_changed(&mut self, changed: bool) {
        if changed {
            self.shape.mark_source_dirty();
        }
    }
}

impl GeoMapItem for PolygonItem {
    fn base(&self) -> &MapItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MapItemBase {
        &mut self.base
    }

    fn update_map_item(&mut self, map: &dyn GeoProjection) {
        if !self.base.is_attached() || !self.path.has_valid_coordinate() {
            return;
        }
        let path = self.path.coordinates();
        match self
            .shape
            .update(map, path, path, FillKind::Triangulated, &self.border)
        {
            Ok(bounds) => self.shape.place(&mut self.base, map, bounds),
            Err(err) => log::debug!("polygon geometry update aborted: {err}"),
        }
    }

    fn after_viewport_changed(&mut self, map: &dyn GeoProjection, change: &ViewportChange) {
        self.shape.after_viewport_changed(change);
        self.update_map_item(map);
    }

    fn contains(&self, point: Point) -> bool {
        self.shape.contains(point)
    }

    fn drag_ended(&mut self, map: &dyn GeoProjection) -> bool {
        let fill = self.shape.fill().geometry();
        let anchor = self.base.position() + fill.first_point_offset();
        let target = map.screen_to_coordinate(anchor, false);
        let origin = fill.origin();
        if !target.is_valid() || !origin.is_valid() {
            return false;
        }
        if translate_path(
            self.path.coordinates_mut(),
            target.latitude - origin.latitude,
            target.longitude - origin.longitude,
        ) {
            self.shape.mark_source_dirty();
        }
        true
    }

    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]> {
        self.shape.render_parts(self.color, &self.border)
    }
}

/// Shifts every valid coordinate by the given deltas.
///
/// The latitude shift is reduced so that no coordinate leaves `[-90, 90]`;
/// longitudes wrap across the antimeridian. Returns `true` if anything
/// moved.
fn translate_path(path: &mut [GeoCoordinate], dlat: f64, dlon: f64) -> bool {
    let (min_lat, max_lat) = path
        .iter()
        .filter(|c| c.is_valid())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.latitude), hi.max(c.latitude))
        });
    if min_lat > max_lat {
        return false;
    }
    let dlat = dlat.clamp(-90.0 - min_lat, 90.0 - max_lat);
    if dlat == 0.0 && dlon == 0.0 {
        return false;
    }
    for c in path.iter_mut().filter(|c| c.is_valid()) {
        c.latitude += dlat;
        c.longitude = wrap_longitude(c.longitude + dlon);
    }
    true
}

#[cfg(test)]
mod tests {
    use geomap_projection::EquirectangularMap;
    use kurbo::{Size, Vec2};

    use super::*;

    fn c(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon)
    }

    fn map() -> EquirectangularMap {
        let mut map = EquirectangularMap::new(Size::new(400.0, 300.0));
        map.set_zoom_level(3.0);
        map
    }

    fn triangle() -> PolygonItem {
        let mut item = PolygonItem::new(vec![c(5.0, -5.0), c(5.0, 5.0), c(-5.0, 0.0)]);
        item.set_color(Color::WHITE);
        item.base_mut().set_attached(true);
        item
    }

    #[test]
    fn fill_and_border_share_placement() {
        let m = map();
        let mut item = triangle();
        item.update_map_item(&m);
        assert!(item.is_visible());
        assert_eq!(item.fill_geometry().indices().len(), 3);
        assert!(!item.border_geometry().is_empty());

        let centroid = m.coordinate_to_screen(c(5.0 / 3.0, 0.0), false);
        let local = centroid - item.base().position().to_vec2();
        assert!(item.contains(local));
        assert!(!item.contains(Point::new(-100.0, -100.0)));

        // The border pokes out by half its width on every side.
        let fill = item.fill_geometry().screen_bounds();
        assert!(item.base().local_bounds().x0 < fill.x0);
    }

    #[test]
    fn hidden_border_is_not_stroked() {
        let m = map();
        let mut item = triangle();
        item.set_border(LineProperties::new(2.0, Color::TRANSPARENT));
        item.update_map_item(&m);
        assert!(item.border_geometry().is_empty());
        assert_eq!(item.base().local_bounds(), item.fill_geometry().screen_bounds());
    }

    #[test]
    fn drag_translates_every_vertex() {
        let m = map();
        let mut item = triangle();
        item.update_map_item(&m);

        let pos = item.base().position();
        item.base_mut().set_position(pos + Vec2::new(0.0, -40.0));
        assert!(item.drag_ended(&m));

        let path = item.path().coordinates();
        let dlat = path[0].latitude - 5.0;
        assert!(dlat > 1.0, "moved north by {dlat}");
        assert!((path[2].latitude - (-5.0 + dlat)).abs() < 1e-9);
        assert!((path[1].longitude - 5.0).abs() < 1e-6);
        assert!(item.fill_geometry().is_source_dirty());
    }

    #[test]
    fn translation_stops_at_the_pole_and_wraps() {
        let mut path = [c(80.0, 170.0), c(70.0, 175.0)];
        assert!(translate_path(&mut path, 30.0, 20.0));
        assert_eq!(path[0], c(90.0, -170.0));
        assert_eq!(path[1], c(80.0, -165.0));
        assert!(!translate_path(&mut [GeoCoordinate::INVALID], 1.0, 1.0));
    }
}
