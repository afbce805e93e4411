// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, PathEl, Point, Rect};

use geomap_projection::{GeoCoordinate, GeoProjection, is_finite_point};

use crate::GeometryError;
use crate::clip::clip_polygon_to_rect;
use crate::geometry::{DrawingMode, MapItemGeometry, points_bounds};

/// Geometry of a filled area: polygon, rectangle and circle fills.
///
/// The source path is always projected as a closed ring. The border of the
/// shape is not part of this buffer; it is stroked separately with a
/// [`PolylineGeometry`](crate::PolylineGeometry) and aligned with
/// [`MapItemGeometry::translate_to_common_origin`].
#[derive(Clone, Debug, Default)]
pub struct PolygonGeometry {
    geometry: MapItemGeometry,
}

impl PolygonGeometry {
    /// Creates an empty, fully dirty fill geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying buffer.
    #[must_use]
    pub fn geometry(&self) -> &MapItemGeometry {
        &self.geometry
    }

    /// The underlying buffer, for flag changes and alignment.
    pub fn geometry_mut(&mut self) -> &mut MapItemGeometry {
        &mut self.geometry
    }

    /// Projects `path` as a closed ring if the source is dirty.
    pub fn update_source_points<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
        path: &[GeoCoordinate],
    ) -> Result<(), GeometryError> {
        self.geometry.update_source_points(map, path, true)
    }

    /// Clips the ring against the viewport and triangulates it into an
    /// indexed [`DrawingMode::Triangles`] list, if the screen is dirty.
    ///
    /// A ring that is off screen, or too degenerate to triangulate, leaves
    /// the buffer empty.
    pub fn update_screen_points<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
    ) -> Result<(), GeometryError> {
        let g = &mut self.geometry;
        if !g.screen_dirty {
            return Ok(());
        }
        let origin = g.origin_on_screen(map)?;

        let mut ring = source_ring(&g.source_path);
        if g.clip_to_viewport {
            let viewport = map.viewport_rect() - origin.to_vec2();
            ring = clip_polygon_to_rect(&ring, viewport);
        }

        g.clear();
        g.mode = DrawingMode::Triangles;
        if ring.len() < 3 {
            log::trace!("polygon fill clipped away entirely");
            return Ok(());
        }

        let coords: Vec<f64> = ring.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = match earcutr::earcut(&coords, &[], 2) {
            Ok(indices) => indices,
            Err(err) => {
                log::debug!("polygon fill triangulation failed: {err:?}");
                return Ok(());
            }
        };
        let Some(indices) = indices
            .into_iter()
            .map(|i| u32::try_from(i).ok())
            .collect::<Option<Vec<u32>>>()
        else {
            return Ok(());
        };
        if indices.is_empty() {
            return Ok(());
        }

        let Some(bounds) = points_bounds(ring.iter().copied()) else {
            return Ok(());
        };
        g.screen_outline = ring_path(&ring);
        g.screen_vertices = ring;
        g.screen_indices = indices;
        g.screen_bounds = bounds;

        let offset = -g.source_bounds.origin().to_vec2();
        g.translate(offset);
        Ok(())
    }

    /// Builds a [`DrawingMode::TriangleFan`] around `center`, if the screen
    /// is dirty.
    ///
    /// The fan is the projected `center`, every ring vertex, and the first
    /// ring vertex again. It is not clipped against the viewport.
    pub fn update_screen_fan<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
        center: GeoCoordinate,
    ) -> Result<(), GeometryError> {
        let g = &mut self.geometry;
        if !g.screen_dirty {
            return Ok(());
        }
        let origin = g.origin_on_screen(map)?;
        let center_screen = map.coordinate_to_screen(center, false);
        if !is_finite_point(center_screen) {
            return Err(GeometryError::NonFiniteProjection);
        }
        let center = (center_screen - origin).to_point();

        let ring = source_ring(&g.source_path);
        g.clear();
        g.mode = DrawingMode::TriangleFan;
        let Some(&first) = ring.first() else {
            return Ok(());
        };

        let mut vertices = Vec::with_capacity(ring.len() + 2);
        vertices.push(center);
        vertices.extend_from_slice(&ring);
        vertices.push(first);

        let Some(bounds) = points_bounds(vertices.iter().copied()) else {
            return Ok(());
        };
        g.screen_outline = ring_path(&ring);
        g.screen_vertices = vertices;
        g.screen_bounds = bounds;

        let offset = -g.source_bounds.origin().to_vec2();
        g.translate(offset);
        Ok(())
    }

    /// Returns `true` if `point` (item-local) is inside the fill, using the
    /// even-odd rule on the outline.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.geometry.contains(point)
    }

    /// Bounds of the screen geometry.
    #[must_use]
    pub fn screen_bounds(&self) -> Rect {
        self.geometry.screen_bounds()
    }
}

/// Vertices of the first subpath, without a repeated closing point.
fn source_ring(path: &BezPath) -> Vec<Point> {
    let mut ring = Vec::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) if ring.is_empty() => ring.push(p),
            PathEl::MoveTo(_) | PathEl::ClosePath => break,
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => ring.push(p),
        }
    }
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn ring_path(ring: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut points = ring.iter();
    if let Some(&first) = points.next() {
        path.move_to(first);
        for &p in points {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use geomap_projection::EquirectangularMap;

    use super::*;

    fn map() -> EquirectangularMap {
        let mut map = EquirectangularMap::new(Size::new(400.0, 300.0));
        map.set_zoom_level(4.0);
        map
    }

    fn square(half: f64) -> Vec<GeoCoordinate> {
        vec![
            GeoCoordinate::new(half, -half),
            GeoCoordinate::new(half, half),
            GeoCoordinate::new(-half, half),
            GeoCoordinate::new(-half, -half),
        ]
    }

    #[test]
    fn square_is_two_triangles() {
        let m = map();
        let mut fill = PolygonGeometry::new();
        fill.update_source_points(&m, &square(2.0)).unwrap();
        fill.update_screen_points(&m).unwrap();

        let g = fill.geometry();
        assert_eq!(g.drawing_mode(), DrawingMode::Triangles);
        assert_eq!(g.vertices().len(), 4);
        assert_eq!(g.indices().len(), 6);
        assert!(g.indices().iter().all(|&i| (i as usize) < g.vertices().len()));

        // Item-local space starts at the top-left of the source bounds.
        assert!(g.screen_bounds().x0.abs() < 1e-9);
        assert!(g.screen_bounds().y0.abs() < 1e-9);
        let c = g.screen_bounds().center();
        assert!(fill.contains(c));
        assert!(!fill.contains(c + kurbo::Vec2::new(g.screen_bounds().width(), 0.0)));
    }

    #[test]
    fn repeated_closing_coordinate_is_ignored() {
        let m = map();
        let mut path = square(2.0);
        path.push(path[0]);
        let mut fill = PolygonGeometry::new();
        fill.update_source_points(&m, &path).unwrap();
        fill.update_screen_points(&m).unwrap();
        assert_eq!(fill.geometry().vertices().len(), 4);
    }

    #[test]
    fn large_polygon_is_clipped_to_the_viewport() {
        let m = map();
        let mut fill = PolygonGeometry::new();
        fill.update_source_points(&m, &square(60.0)).unwrap();
        fill.update_screen_points(&m).unwrap();
        let b = fill.screen_bounds();
        assert!((b.width() - 400.0).abs() < 1e-6, "{b:?}");
        assert!((b.height() - 300.0).abs() < 1e-6, "{b:?}");
    }

    #[test]
    fn off_screen_polygon_is_empty() {
        let mut m = map();
        let mut fill = PolygonGeometry::new();
        fill.update_source_points(&m, &square(2.0)).unwrap();
        m.set_center(GeoCoordinate::new(0.0, 120.0));
        fill.update_screen_points(&m).unwrap();
        assert!(fill.geometry().is_empty());
        assert!(!fill.contains(Point::ORIGIN));
    }

    #[test]
    fn fan_has_center_and_closing_vertex() {
        let m = map();
        let ring = square(2.0);
        let mut fill = PolygonGeometry::new();
        fill.update_source_points(&m, &ring).unwrap();
        fill.update_screen_fan(&m, GeoCoordinate::new(0.0, 0.0)).unwrap();

        let g = fill.geometry();
        assert_eq!(g.drawing_mode(), DrawingMode::TriangleFan);
        assert_eq!(g.vertices().len(), 4 + 2);
        assert_eq!(g.vertices()[1], g.vertices()[5]);
        assert!((g.vertices()[0] - g.screen_bounds().center()).hypot() < 1e-9);
    }

    #[test]
    fn non_finite_fan_center_is_rejected() {
        let m = map();
        let mut fill = PolygonGeometry::new();
        fill.update_source_points(&m, &square(2.0)).unwrap();
        let err = fill
            .update_screen_fan(&m, GeoCoordinate::INVALID)
            .unwrap_err();
        assert_eq!(err, GeometryError::NonFiniteProjection);
        assert!(fill.geometry().is_empty());
    }
}
