// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of geographic paths into origin-relative screen offsets.

use kurbo::{BezPath, Point, Rect, Vec2};

use geomap_projection::{GeoCoordinate, GeoProjection, is_finite_point};

use crate::GeometryError;
use crate::geometry::MapItemGeometry;

/// Consecutive projected points closer than this Manhattan distance (in
/// pixels) are merged, except for the last point of a path.
pub const DECIMATION_THRESHOLD: f64 = 3.0;

/// A projected, decimated path relative to its origin.
#[derive(Clone, Debug)]
pub(crate) struct ProjectedPath {
    pub(crate) origin: GeoCoordinate,
    pub(crate) path: BezPath,
    pub(crate) bounds: Rect,
}

/// Projects `coordinates` through `map`.
///
/// Invalid coordinates are skipped. The first valid coordinate becomes the
/// origin and lands at `(0, 0)`. Fails without producing anything if there
/// is no valid coordinate or if any projection is not finite.
pub(crate) fn project_path<P: GeoProjection + ?Sized>(
    map: &P,
    coordinates: &[GeoCoordinate],
    close: bool,
) -> Result<ProjectedPath, GeometryError> {
    let Some(origin) = coordinates.iter().copied().find(GeoCoordinate::is_valid) else {
        return Err(GeometryError::NoValidCoordinates);
    };
    let origin_screen = map.coordinate_to_screen(origin, false);
    if !is_finite_point(origin_screen) {
        return Err(GeometryError::NonFiniteProjection);
    }

    let last_index = coordinates.len() - 1;
    let mut path = BezPath::new();
    let mut bounds = Rect::from_points(Point::ORIGIN, Point::ORIGIN);
    let mut last: Option<Point> = None;

    for (i, &coordinate) in coordinates.iter().enumerate() {
        if !coordinate.is_valid() {
            continue;
        }
        let screen = map.coordinate_to_screen(coordinate, false);
        if !is_finite_point(screen) {
            return Err(GeometryError::NonFiniteProjection);
        }
        let p = (screen - origin_screen).to_point();
        bounds = bounds.union_pt(p);

        match last {
            None => {
                path.move_to(Point::ORIGIN);
                last = Some(Point::ORIGIN);
            }
            Some(prev) => {
                let d: Vec2 = p - prev;
                if d.x.abs() + d.y.abs() > DECIMATION_THRESHOLD || i == last_index {
                    path.line_to(p);
                    last = Some(p);
                }
            }
        }
    }
    if close {
        path.close_path();
    }

    Ok(ProjectedPath {
        origin,
        path,
        bounds,
    })
}

impl MapItemGeometry {
    /// Re-projects `coordinates` into the source path if the source is
    /// dirty.
    ///
    /// `close` appends a `ClosePath` for rings. On error the buffer is left
    /// exactly as it was.
    pub fn update_source_points<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
        coordinates: &[GeoCoordinate],
        close: bool,
    ) -> Result<(), GeometryError> {
        if !self.source_dirty {
            return Ok(());
        }
        let projected = project_path(map, coordinates, close)?;
        self.origin = projected.origin;
        self.source_path = projected.path;
        self.source_bounds = projected.bounds;
        Ok(())
    }

    /// Screen position of the origin, checked for finiteness.
    pub(crate) fn origin_on_screen<P: GeoProjection + ?Sized>(
        &self,
        map: &P,
    ) -> Result<Point, GeometryError> {
        let origin = map.coordinate_to_screen(self.origin, false);
        if is_finite_point(origin) {
            Ok(origin)
        } else {
            Err(GeometryError::NonFiniteProjection)
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{PathEl, Size};

    use geomap_projection::EquirectangularMap;

    use super::*;

    fn map() -> EquirectangularMap {
        let mut map = EquirectangularMap::new(Size::new(800.0, 600.0));
        map.set_zoom_level(6.0);
        map
    }

    fn points(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_valid_coordinate_is_the_origin() {
        let coords = [
            GeoCoordinate::INVALID,
            GeoCoordinate::new(1.0, 1.0),
            GeoCoordinate::new(1.0, 2.0),
        ];
        let projected = project_path(&map(), &coords, false).unwrap();
        assert_eq!(projected.origin, coords[1]);
        let pts = points(&projected.path);
        assert_eq!(pts[0], Point::ORIGIN);
        assert_eq!(pts.len(), 2);
        assert!(pts[1].x > 0.0);
    }

    #[test]
    fn close_points_are_decimated_but_last_is_kept() {
        let m = map();
        // At zoom 6 one degree of longitude is ~45.5 px.
        let coords = [
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(0.0, 0.01),
            GeoCoordinate::new(0.0, 0.02),
            GeoCoordinate::new(0.0, 1.0),
            GeoCoordinate::new(0.0, 1.01),
        ];
        let projected = project_path(&m, &coords, false).unwrap();
        let pts = points(&projected.path);
        assert_eq!(pts.len(), 3);
        let last = m.coordinate_to_screen(coords[4], false) - m.coordinate_to_screen(coords[0], false);
        assert!((pts[2].x - last.x).abs() < 1e-9);
        // Bounds still cover every projected point.
        assert!((projected.bounds.x1 - last.x).abs() < 1e-9);
    }

    #[test]
    fn no_valid_coordinates() {
        let err = project_path(&map(), &[GeoCoordinate::INVALID], false).unwrap_err();
        assert_eq!(err, GeometryError::NoValidCoordinates);
        let err = project_path(&map(), &[], false).unwrap_err();
        assert_eq!(err, GeometryError::NoValidCoordinates);
    }

    #[test]
    fn closed_paths_end_in_close() {
        let coords = [
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(0.0, 1.0),
            GeoCoordinate::new(1.0, 1.0),
        ];
        let projected = project_path(&map(), &coords, true).unwrap();
        assert_eq!(projected.path.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn clean_source_is_not_reprojected() {
        let m = map();
        let mut g = MapItemGeometry::new();
        let coords = [GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(2.0, 2.0)];
        g.update_source_points(&m, &coords, false).unwrap();
        let before = g.source_path().clone();
        g.mark_clean();
        g.update_source_points(&m, &[GeoCoordinate::new(5.0, 5.0)], false)
            .unwrap();
        assert_eq!(g.source_path(), &before);
        assert_eq!(g.origin(), coords[0]);
    }
}
