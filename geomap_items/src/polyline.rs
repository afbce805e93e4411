// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::{MapItemGeometry, PolylineGeometry};
use geomap_projection::{GeoCoordinate, GeoProjection, ViewportChange};
use kurbo::Point;
use smallvec::{SmallVec, smallvec};

use crate::item::{GeoMapItem, MapItemBase, RenderPart, mark_for_viewport_change};
use crate::line::LineProperties;
use crate::path::GeoPath;

/// An open line through a list of coordinates.
///
/// Polylines cannot be dragged; [`drag_ended`](GeoMapItem::drag_ended)
/// refuses and the item snaps back on the next update.
#[derive(Clone, Debug, Default)]
pub struct PolylineItem {
    base: MapItemBase,
    path: GeoPath,
    line: LineProperties,
    geometry: PolylineGeometry,
}

impl PolylineItem {
    /// Polyline through `path` with a default line.
    #[must_use]
    pub fn new(path: impl Into<GeoPath>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// The path.
    #[must_use]
    pub fn path(&self) -> &GeoPath {
        &self.path
    }

    /// Replaces the whole path.
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

    /// Returns `true` if `coordinate` is on the path.
    #[must_use]
    pub fn contains_coordinate(&self, coordinate: GeoCoordinate) -> bool {
        self.path.contains(coordinate)
    }

    /// Number of coordinates on the path.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// The line.
    #[must_use]
    pub fn line(&self) -> LineProperties {
        self.line
    }

    /// Sets the line. Only a width change touches the geometry.
    pub fn set_line(&mut self, line: LineProperties) {
        let reshape = line.width != self.line.width;
        self.line = line;
        if reshape {
            self.geometry.geometry_mut().mark_source_dirty();
        }
    }

    /// The stroked geometry.
    #[must_use]
    pub fn geometry(&self) -> &MapItemGeometry {
        self.geometry.geometry()
    }

    fn path_changed(&mut self, changed: bool) {
        if changed {
            self.geometry.geometry_mut().mark_source_dirty();
        }
    }
}

impl GeoMapItem for PolylineItem {
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
        update_line(
            &mut self.base,
            &mut self.geometry,
            map,
            self.path.coordinates(),
            &self.line,
        );
    }

    fn after_viewport_changed(&mut self, map: &dyn GeoProjection, change: &ViewportChange) {
        mark_for_viewport_change(change, &mut [self.geometry.geometry_mut()]);
        self.update_map_item(map);
    }

    fn contains(&self, point: Point) -> bool {
        self.geometry.contains(point)
    }

    fn drag_ended(&mut self, _map: &dyn GeoProjection) -> bool {
        log::warn!("polylines cannot be dragged");
        false
    }

    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]> {
        smallvec![RenderPart {
            geometry: self.geometry.geometry_mut(),
            color: self.line.color,
        }]
    }
}

/// Runs both geometry steps for a stroked open line and places `base`.
pub(crate) fn update_line(
    base: &mut MapItemBase,
    geometry: &mut PolylineGeometry,
    map: &dyn GeoProjection,
    path: &[GeoCoordinate],
    line: &LineProperties,
) {
    let result = geometry
        .update_source_points(map, path, false)
        .and_then(|()| geometry.update_screen_points(map, &line.stroke_style()));
    if let Err(err) = result {
        log::debug!("line geometry update aborted: {err}");
        return;
    }

    let g = geometry.geometry();
    if g.is_empty() {
        base.hide();
        return;
    }
    base.place(map, g.origin(), g.first_point_offset(), g.screen_bounds());
}
