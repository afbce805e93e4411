// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

use geomap_projection::{GeoCoordinate, GeoProjection};

use crate::GeometryError;
use crate::clip::clip_path_to_rect;
use crate::geometry::{DrawingMode, MapItemGeometry, points_bounds};
use crate::stroke::{StrokeStyle, strip_outline, stroke_path};

/// Geometry of a stroked line: polylines, routes and shape borders.
///
/// The screen step clips the source path against the viewport (inflated by
/// the stroke width so that caps and joins just outside stay visible) and
/// strokes the result into a [`DrawingMode::TriangleStrip`].
#[derive(Clone, Debug, Default)]
pub struct PolylineGeometry {
    geometry: MapItemGeometry,
}

impl PolylineGeometry {
    /// Creates an empty, fully dirty polyline geometry.
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

    /// Projects `path` if the source is dirty. `close` strokes it as a ring.
    pub fn update_source_points<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
        path: &[GeoCoordinate],
        close: bool,
    ) -> Result<(), GeometryError> {
        self.geometry.update_source_points(map, path, close)
    }

    /// Clips and strokes the source path if the screen is dirty.
    ///
    /// On success the vertices are in item-local coordinates whose `(0, 0)`
    /// is the top-left of the source bounds. An empty result (the line is
    /// entirely off screen) clears the buffer and is not an error.
    pub fn update_screen_points<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
        style: &StrokeStyle,
    ) -> Result<(), GeometryError> {
        let g = &mut self.geometry;
        if !g.screen_dirty {
            return Ok(());
        }
        let origin = g.origin_on_screen(map)?;

        let w = style.width;
        let viewport = Rect::new(-w, -w, map.width() + 2.0 * w, map.height() + 2.0 * w)
            - origin.to_vec2();

        let clipped;
        let source = if g.clip_to_viewport {
            clipped = clip_path_to_rect(&g.source_path, viewport);
            &clipped
        } else {
            &g.source_path
        };
        let strip = stroke_path(source, style);

        g.clear();
        g.mode = DrawingMode::TriangleStrip;
        let Some(bounds) = points_bounds(strip.iter().copied()) else {
            log::trace!("polyline clipped away entirely");
            return Ok(());
        };
        g.screen_outline = strip_outline(&strip);
        g.screen_vertices = strip;
        g.screen_bounds = bounds;

        let offset: Vec2 = -g.source_bounds.origin().to_vec2();
        g.translate(offset);
        Ok(())
    }

    /// Returns `true` if `point` (item-local) lies on the stroked line.
    ///
    /// Every triangle of the strip is tested on its own, so overlapping
    /// triangles at joins do not cancel each other out.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.geometry.strip_contains(point)
    }
}
