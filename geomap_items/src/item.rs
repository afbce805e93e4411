// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_geometry::MapItemGeometry;
use geomap_projection::{GeoCoordinate, GeoProjection, ViewportChange, is_finite_point};
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use smallvec::SmallVec;

/// Tilt or roll above this many degrees makes the projection non-affine
/// for the purpose of reusing source offsets.
const TILT_ROLL_EPSILON: f64 = 0.1;

/// Screen placement shared by every map item.
///
/// `position` is the top-left of the item in screen coordinates and
/// `local_bounds` is the extent of its geometry in item-local coordinates.
#[derive(Clone, Debug, Default)]
pub struct MapItemBase {
    position: Point,
    local_bounds: Rect,
    visible: bool,
    attached: bool,
    placed: bool,
}

impl MapItemBase {
    /// Top-left of the item on screen.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the item on screen, as an interactive drag does. The geographic
    /// data follows once the drag ends.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Size of the item's geometry.
    #[must_use]
    pub fn size(&self) -> Size {
        self.local_bounds.size()
    }

    /// Extent of the geometry in item-local coordinates.
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        self.local_bounds
    }

    /// Extent of the geometry in screen coordinates.
    #[must_use]
    pub fn screen_bounds(&self) -> Rect {
        self.local_bounds + self.position.to_vec2()
    }

    /// Returns `false` if the item ended up entirely outside the viewport.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` while the item belongs to a map.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns `true` once the item has been positioned at least once.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
        if !attached {
            self.visible = false;
            self.placed = false;
        }
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    /// Positions the item so that item-local `(0, 0)` lands at the anchor's
    /// screen position minus `first_point_offset`, then updates visibility.
    pub(crate) fn place<P: GeoProjection + ?Sized>(
        &mut self,
        map: &P,
        anchor: GeoCoordinate,
        first_point_offset: Vec2,
        local_bounds: Rect,
    ) {
        let anchor = map.coordinate_to_screen(anchor, false);
        if !is_finite_point(anchor) {
            log::debug!("map item anchor has no screen position");
            self.visible = false;
            return;
        }
        self.position = anchor - first_point_offset;
        self.local_bounds = local_bounds;
        self.placed = true;
        self.visible = overlaps(self.screen_bounds(), map.viewport_rect());
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// One renderable part of an item: a geometry buffer and its colour.
#[derive(Debug)]
pub struct RenderPart<'a> {
    /// Geometry to upload.
    pub geometry: &'a mut MapItemGeometry,
    /// Colour to draw it with.
    pub color: Color,
}

/// What every map item can do, independent of its shape.
///
/// Coordinates passed to [`contains`](Self::contains) are item-local.
pub trait GeoMapItem {
    /// Placement state.
    fn base(&self) -> &MapItemBase;

    /// Mutable placement state.
    fn base_mut(&mut self) -> &mut MapItemBase;

    /// Recomputes dirty geometry and repositions the item.
    ///
    /// Does nothing (and keeps the dirty flags) if the item is not attached
    /// to a map or its geographic data is unusable.
    fn update_map_item(&mut self, map: &dyn GeoProjection);

    /// Reacts to a camera or viewport change by dirtying geometry and
    /// recomputing it.
    fn after_viewport_changed(&mut self, map: &dyn GeoProjection, change: &ViewportChange);

    /// Returns `true` if the item-local `point` hits the item.
    fn contains(&self, point: Point) -> bool;

    /// Writes the screen position reached by a drag back into the item's
    /// geographic data. Returns `false` if the item cannot be dragged or
    /// the position does not map to a valid coordinate.
    fn drag_ended(&mut self, map: &dyn GeoProjection) -> bool;

    /// Geometry buffers to hand to the renderer, in drawing order.
    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]>;

    /// Extent of the item on screen.
    fn bounding_box_on_screen(&self) -> Rect {
        self.base().screen_bounds()
    }

    /// Returns `false` if the item is entirely outside the viewport.
    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }
}

/// Returns `true` if `change` invalidates projected source offsets, not just
/// their placement.
#[must_use]
pub fn change_needs_source_update(change: &ViewportChange) -> bool {
    change.zoom_level_changed()
        || change.bearing_changed()
        || change.map_size_changed()
        || change.camera.tilt.abs() > TILT_ROLL_EPSILON
        || change.camera.roll.abs() > TILT_ROLL_EPSILON
}

/// Applies the viewport-change policy to a set of geometry buffers.
pub(crate) fn mark_for_viewport_change(
    change: &ViewportChange,
    geometries: &mut [&mut MapItemGeometry],
) {
    let source = change_needs_source_update(change);
    for g in geometries {
        if source {
            g.mark_source_dirty();
        }
        g.mark_screen_dirty();
    }
}
