// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::{MapItemGeometry, rectangle_path};
use geomap_projection::{
    GeoCoordinate, GeoProjection, ViewportChange, clip_latitude, is_valid_latitude,
    wrap_longitude,
};
use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

use crate::item::{GeoMapItem, MapItemBase, RenderPart};
use crate::line::LineProperties;
use crate::shape::{FillKind, ShapeGeometry};

/// A filled rectangle between two corner coordinates.
#[derive(Clone, Debug)]
pub struct RectangleItem {
    base: MapItemBase,
    top_left: GeoCoordinate,
    bottom_right: GeoCoordinate,
    color: Color,
    border: LineProperties,
    shape: ShapeGeometry,
}

impl RectangleItem {
    /// Rectangle spanning `top_left` to `bottom_right`.
    #[must_use]
    pub fn new(top_left: GeoCoordinate, bottom_right: GeoCoordinate) -> Self {
        Self {
            base: MapItemBase::default(),
            top_left,
            bottom_right,
            color: Color::TRANSPARENT,
            border: LineProperties::default(),
            shape: ShapeGeometry::default(),
        }
    }

    /// North-west corner.
    #[must_use]
    pub fn top_left(&self) -> GeoCoordinate {
        self.top_left
    }

    /// Moves the north-west corner.
    pub fn set_top_left(&mut self, top_left: GeoCoordinate) {
        if self.top_left == top_left {
            return;
        }
        self.top_left = top_left;
        self.shape.mark_source_dirty();
    }

    /// South-east corner.
    #[must_use]
    pub fn bottom_right(&self) -> GeoCoordinate {
        self.bottom_right
    }

    /// Moves the south-east corner.
    pub fn set_bottom_right(&mut self, bottom_right: GeoCoordinate) {
        if self.bottom_right == bottom_right {
            return;
        }
        self.bottom_right = bottom_right;
        self.shape.mark_source_dirty();
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
}

impl GeoMapItem for RectangleItem {
    fn base(&self) -> &MapItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MapItemBase {
        &mut self.base
    }

    fn update_map_item(&mut self, map: &dyn GeoProjection) {
        if !self.base.is_attached() || !self.top_left.is_valid() || !self.bottom_right.is_valid() {
            return;
        }
        let path = rectangle_path(self.top_left, self.bottom_right);
        match self
            .shape
            .update(map, &path[..4], &path, FillKind::Triangulated, &self.border)
        {
            Ok(bounds) => self.shape.place(&mut self.base, map, bounds),
            Err(err) => log::debug!("rectangle geometry update aborted: {err}"),
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
        let top_left = map.screen_to_coordinate(self.base.position(), false);
        if !top_left.is_valid() {
            return false;
        }
        let (top_left, bottom_right) = moved_corners(self.top_left, self.bottom_right, top_left);
        self.set_top_left(top_left);
        self.set_bottom_right(bottom_right);
        true
    }

    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]> {
        self.shape.render_parts(self.color, &self.border)
    }
}

/// Corners of a rectangle of the same geographic extent whose top-left is
/// moved to `new_top_left`.
///
/// The longitude span is measured eastward, so a rectangle crossing the
/// antimeridian keeps its width. If the span would push the bottom edge
/// past a pole, the rectangle is shifted back so that it touches the pole.
fn moved_corners(
    top_left: GeoCoordinate,
    bottom_right: GeoCoordinate,
    mut new_top_left: GeoCoordinate,
) -> (GeoCoordinate, GeoCoordinate) {
    let lon_span = if bottom_right.longitude > top_left.longitude {
        bottom_right.longitude - top_left.longitude
    } else {
        bottom_right.longitude + 360.0 - top_left.longitude
    };
    let lat_span = (bottom_right.latitude - top_left.latitude).abs();

    let mut new_bottom_right = bottom_right;
    let bottom = new_top_left.latitude - lat_span;
    if is_valid_latitude(bottom) {
        new_bottom_right.latitude = bottom;
    } else {
        new_bottom_right.latitude = clip_latitude(bottom);
        new_top_left.latitude = new_bottom_right.latitude + lat_span;
    }
    new_bottom_right.longitude = wrap_longitude(new_top_left.longitude + lon_span);
    (new_top_left, new_bottom_right)
}
