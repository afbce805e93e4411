// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::{GeometryError, MapItemGeometry, PolygonGeometry, PolylineGeometry};
use geomap_projection::{GeoCoordinate, GeoProjection, ViewportChange};
use kurbo::{Point, Rect};
use peniko::Color;
use smallvec::{SmallVec, smallvec};

use crate::item::{MapItemBase, RenderPart, mark_for_viewport_change};
use crate::line::LineProperties;

/// How a shape's interior is triangulated.
#[derive(Clone, Copy, Debug)]
pub(crate) enum FillKind {
    /// Clipped to the viewport and triangulated into an indexed list.
    Triangulated,
    /// Fanned out from the given center, unclipped.
    Fan(GeoCoordinate),
}

/// Fill and border geometry of a closed shape, kept on a common origin.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapeGeometry {
    fill: PolygonGeometry,
    border: PolylineGeometry,
}

impl ShapeGeometry {
    pub(crate) fn fill(&self) -> &PolygonGeometry {
        &self.fill
    }

    pub(crate) fn border(&self) -> &PolylineGeometry {
        &self.border
    }

    pub(crate) fn is_source_dirty(&self) -> bool {
        self.fill.geometry().is_source_dirty() || self.border.geometry().is_source_dirty()
    }

    pub(crate) fn mark_source_dirty(&mut self) {
        self.fill.geometry_mut().mark_source_dirty();
        self.border.geometry_mut().mark_source_dirty();
    }

    pub(crate) fn after_viewport_changed(&mut self, change: &ViewportChange) {
        mark_for_viewport_change(
            change,
            &mut [self.fill.geometry_mut(), self.border.geometry_mut()],
        );
    }

    /// Runs both geometry steps for fill and border and aligns them.
    ///
    /// Returns the union of their screen bounds in item-local coordinates.
    pub(crate) fn update<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
        fill_path: &[GeoCoordinate],
        border_path: &[GeoCoordinate],
        kind: FillKind,
        line: &LineProperties,
    ) -> Result<Rect, GeometryError> {
        self.fill.update_source_points(map, fill_path)?;
        match kind {
            FillKind::Triangulated => self.fill.update_screen_points(map)?,
            FillKind::Fan(center) => self.fill.update_screen_fan(map, center)?,
        }

        if line.is_visible() {
            self.border.update_source_points(map, border_path, true)?;
            self.border.update_screen_points(map, &line.stroke_style())?;
            Ok(MapItemGeometry::translate_to_common_origin(&mut [
                self.fill.geometry_mut(),
                self.border.geometry_mut(),
            ]))
        } else {
            self.border.geometry_mut().clear();
            Ok(MapItemGeometry::translate_to_common_origin(&mut [
                self.fill.geometry_mut(),
            ]))
        }
    }

    /// Positions `base` from the aligned geometry.
    pub(crate) fn place<P: GeoProjection + ?Sized>(
        &self,
        base: &mut MapItemBase,
        map: &P,
        bounds: Rect,
    ) {
        if self.fill.geometry().is_empty() && self.border.geometry().is_empty() {
            base.hide();
            return;
        }
        let fill = self.fill.geometry();
        base.place(map, fill.origin(), fill.first_point_offset(), bounds);
    }

    pub(crate) fn contains(&self, point: Point) -> bool {
        self.fill.contains(point) || self.border.contains(point)
    }

    pub(crate) fn render_parts(
        &mut self,
        fill_color: Color,
        line: &LineProperties,
    ) -> SmallVec<[RenderPart<'_>; 2]> {
        smallvec![
            RenderPart {
                geometry: self.fill.geometry_mut(),
                color: fill_color,
            },
            RenderPart {
                geometry: self.border.geometry_mut(),
                color: line.color,
            },
        ]
    }
}
