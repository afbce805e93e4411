// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::{CIRCLE_SAMPLE_COUNT, MapItemGeometry, peripheral_points};
use geomap_projection::{GeoCoordinate, GeoProjection, ViewportChange};
use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

use crate::item::{GeoMapItem, MapItemBase, RenderPart};
use crate::line::LineProperties;
use crate::shape::{FillKind, ShapeGeometry};

/// A geodesic circle with a fill and an optional border.
///
/// The circle is sampled at [`CIRCLE_SAMPLE_COUNT`] peripheral points. The
/// fill is a triangle fan around the projected center and is not clipped to
/// the viewport; the border is a clipped, stroked ring.
#[derive(Clone, Debug)]
pub struct CircleItem {
    base: MapItemBase,
    center: GeoCoordinate,
    radius: f64,
    color: Color,
    border: LineProperties,
    circle_path: Vec<GeoCoordinate>,
    shape: ShapeGeometry,
}

impl CircleItem {
    /// Circle of `radius` meters around `center`, with a transparent fill and
    /// a default border.
    #[must_use]
    pub fn new(center: GeoCoordinate, radius: f64) -> Self {
        Self {
            base: MapItemBase::default(),
            center,
            radius,
            color: Color::TRANSPARENT,
            border: LineProperties::default(),
            circle_path: Vec::new(),
            shape: ShapeGeometry::default(),
        }
    }

    /// Center of the circle.
    #[must_use]
    pub fn center(&self) -> GeoCoordinate {
        self.center
    }

    /// Moves the circle.
    pub fn set_center(&mut self, center: GeoCoordinate) {
        if self.center == center {
            return;
        }
        self.center = center;
        self.shape.mark_source_dirty();
    }

    /// Radius in meters.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sets the radius in meters.
    pub fn set_radius(&mut self, radius: f64) {
        if self.radius == radius {
            return;
        }
        self.radius = radius;
        self.shape.mark_source_dirty();
    }

    /// Fill colour.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Sets the fill colour. Geometry is unaffected.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Border line.
    #[must_use]
    pub fn border(&self) -> LineProperties {
        self.border
    }

    /// Sets the border line.
    ///
    /// A change of width, or a change between drawable and not drawable,
    /// re-projects the shape since the stroked footprint changes.
    pub fn set_border(&mut self, border: LineProperties) {
        let reshape =
            border.width != self.border.width || border.is_visible() != self.border.is_visible();
        self.border = border;
        if reshape {
            self.shape.mark_source_dirty();
        }
    }

    /// The sampled circle boundary from the last source update.
    #[must_use]
    pub fn peripheral_path(&self) -> &[GeoCoordinate] {
        &self.circle_path
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
}

impl GeoMapItem for CircleItem {
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
        if !self.center.is_valid() || !self.radius.is_finite() || self.radius < 0.0 {
            log::debug!("circle has no valid center and radius; skipping update");
            return;
        }

        if self.shape.is_source_dirty() {
            self.circle_path = peripheral_points(self.center, self.radius, CIRCLE_SAMPLE_COUNT);
        }
        match self.shape.update(
            map,
            &self.circle_path,
            &self.circle_path,
            FillKind::Fan(self.center),
            &self.border,
        ) {
            Ok(bounds) => self.shape.place(&mut self.base, map, bounds),
            Err(err) => log::debug!("circle geometry update aborted: {err}"),
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
        // The fan's first vertex is the projected center, in item-local space.
        let Some(&local_center) = self.shape.fill().geometry().vertices().first() else {
            return false;
        };
        let center = self.base.position() + local_center.to_vec2();
        let center = map.screen_to_coordinate(center, false);
        if !center.is_valid() {
            return false;
        }
        self.set_center(center);
        true
    }

    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]> {
        self.shape.render_parts(self.color, &self.border)
    }
}
