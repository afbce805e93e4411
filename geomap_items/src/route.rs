// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;
use std::time::Duration;

use geomap_geometry::{MapItemGeometry, PolylineGeometry};
use geomap_projection::{GeoCoordinate, GeoProjection, ViewportChange};
use kurbo::Point;
use smallvec::{SmallVec, smallvec};

use crate::item::{GeoMapItem, MapItemBase, RenderPart, mark_for_viewport_change};
use crate::line::LineProperties;
use crate::polyline::update_line;

/// Latitude/longitude extent of a set of coordinates.
///
/// Spans across the antimeridian are not detected; the box is simply the
/// minimum and maximum of each component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    /// North-west corner.
    pub top_left: GeoCoordinate,
    /// South-east corner.
    pub bottom_right: GeoCoordinate,
}

impl GeoBounds {
    /// Bounds of the valid coordinates in `coordinates`, or `None` if there
    /// are none.
    #[must_use]
    pub fn from_coordinates(coordinates: &[GeoCoordinate]) -> Option<Self> {
        let mut valid = coordinates.iter().filter(|c| c.is_valid());
        let first = *valid.next()?;
        let (mut north, mut south) = (first.latitude, first.latitude);
        let (mut west, mut east) = (first.longitude, first.longitude);
        for c in valid {
            north = north.max(c.latitude);
            south = south.min(c.latitude);
            west = west.min(c.longitude);
            east = east.max(c.longitude);
        }
        Some(Self {
            top_left: GeoCoordinate::new(north, west),
            bottom_right: GeoCoordinate::new(south, east),
        })
    }

    /// Returns `true` if `coordinate` lies inside, edges included.
    #[must_use]
    pub fn contains(&self, coordinate: GeoCoordinate) -> bool {
        (self.bottom_right.latitude..=self.top_left.latitude).contains(&coordinate.latitude)
            && (self.top_left.longitude..=self.bottom_right.longitude)
                .contains(&coordinate.longitude)
    }
}

/// A computed route: the road geometry plus its summary figures.
///
/// Routes are produced elsewhere and shared read-only with the items that
/// display them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoRoute {
    path: Vec<GeoCoordinate>,
    distance: f64,
    travel_time: Duration,
    bounds: Option<GeoBounds>,
}

impl GeoRoute {
    /// Route along `path`, `distance` meters long and taking `travel_time`.
    #[must_use]
    pub fn new(path: Vec<GeoCoordinate>, distance: f64, travel_time: Duration) -> Self {
        let bounds = GeoBounds::from_coordinates(&path);
        Self {
            path,
            distance,
            travel_time,
            bounds,
        }
    }

    /// The route geometry.
    #[must_use]
    pub fn path(&self) -> &[GeoCoordinate] {
        &self.path
    }

    /// Length in meters.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Estimated travel time.
    #[must_use]
    pub fn travel_time(&self) -> Duration {
        self.travel_time
    }

    /// Extent of the path, if it has any valid coordinate.
    #[must_use]
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.bounds
    }
}

/// Displays a [`GeoRoute`] as a stroked line.
#[derive(Clone, Debug, Default)]
pub struct RouteItem {
    base: MapItemBase,
    route: Option<Arc<GeoRoute>>,
    line: LineProperties,
    geometry: PolylineGeometry,
}

impl RouteItem {
    /// Item showing `route`.
    #[must_use]
    pub fn new(route: Arc<GeoRoute>) -> Self {
        Self {
            route: Some(route),
            ..Self::default()
        }
    }

    /// The displayed route.
    #[must_use]
    pub fn route(&self) -> Option<&Arc<GeoRoute>> {
        self.route.as_ref()
    }

    /// Replaces the displayed route.
    pub fn set_route(&mut self, route: Option<Arc<GeoRoute>>) {
        let same = match (&self.route, &route) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }
        self.route = route;
        self.geometry.geometry_mut().mark_source_dirty();
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
}

impl GeoMapItem for RouteItem {
    fn base(&self) -> &MapItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MapItemBase {
        &mut self.base
    }

    fn update_map_item(&mut self, map: &dyn GeoProjection) {
        if !self.base.is_attached() {
            return;
        }
        let Some(route) = self.route.as_deref() else {
            return;
        };
        if route.bounds().is_none() {
            return;
        }
        update_line(&mut self.base, &mut self.geometry, map, route.path(), &self.line);
    }

    fn after_viewport_changed(&mut self, map: &dyn GeoProjection, change: &ViewportChange) {
        mark_for_viewport_change(change, &mut [self.geometry.geometry_mut()]);
        self.update_map_item(map);
    }

    fn contains(&self, point: Point) -> bool {
        self.geometry.contains(point)
    }

    fn drag_ended(&mut self, _map: &dyn GeoProjection) -> bool {
        log::warn!("routes cannot be dragged");
        false
    }

    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]> {
        smallvec![RenderPart {
            geometry: self.geometry.geometry_mut(),
            color: self.line.color,
        }]
    }
}

#[cfg(test)]
mod tests {
    use geomap_projection::EquirectangularMap;
    use kurbo::Size;

    use super::*;

    fn c(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon)
    }

    #[test]
    fn bounds_skip_invalid_coordinates() {
        let route = GeoRoute::new(
            vec![c(1.0, 2.0), GeoCoordinate::INVALID, c(-3.0, 8.0), c(4.0, 5.0)],
            1_200.0,
            Duration::from_secs(90),
        );
        let bounds = route.bounds().unwrap();
        assert_eq!(bounds.top_left, c(4.0, 2.0));
        assert_eq!(bounds.bottom_right, c(-3.0, 8.0));
        assert!(bounds.contains(c(0.0, 5.0)));
        assert!(!bounds.contains(c(0.0, 9.0)));
        assert_eq!(GeoRoute::default().bounds(), None);
    }

    #[test]
    fn route_renders_like_a_polyline() {
        let mut map = EquirectangularMap::new(Size::new(400.0, 300.0));
        map.set_zoom_level(4.0);
        let route = Arc::new(GeoRoute::new(
            vec![c(0.0, -3.0), c(1.0, 0.0), c(0.0, 3.0)],
            700_000.0,
            Duration::from_secs(3600),
        ));
        let mut item = RouteItem::new(Arc::clone(&route));
        item.base_mut().set_attached(true);
        item.update_map_item(&map);
        assert!(!item.geometry().is_empty());
        assert!(item.is_visible());

        item.geometry.geometry_mut().mark_clean();
        item.set_route(Some(Arc::clone(&route)));
        assert!(!item.geometry().is_source_dirty());
        item.set_route(None);
        assert!(item.geometry().is_source_dirty());
        assert!(!item.drag_ended(&map));
    }
}
