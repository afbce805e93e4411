// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_projection::{GeoCoordinate, GeoProjection, ViewportChange, is_finite_point};
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::item::{GeoMapItem, MapItemBase, RenderPart};

/// A fixed-size screen item pinned to a coordinate, such as a marker icon.
///
/// The item keeps its pixel size at every zoom level. `anchor_point` is the
/// item-local point that sits exactly on the coordinate. Quick items carry
/// no geometry of their own; the caller draws their content.
#[derive(Clone, Debug)]
pub struct QuickItem {
    base: MapItemBase,
    coordinate: GeoCoordinate,
    anchor_point: Vec2,
    size: Size,
}

impl QuickItem {
    /// Item of `size` pixels anchored at its top-left.
    #[must_use]
    pub fn new(coordinate: GeoCoordinate, size: Size) -> Self {
        Self {
            base: MapItemBase::default(),
            coordinate,
            anchor_point: Vec2::ZERO,
            size,
        }
    }

    /// Same item with the anchor at `anchor_point`.
    #[must_use]
    pub fn with_anchor_point(mut self, anchor_point: Vec2) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    /// The pinned coordinate.
    #[must_use]
    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }

    /// Pins the item to a new coordinate.
    pub fn set_coordinate(&mut self, coordinate: GeoCoordinate) {
        self.coordinate = coordinate;
    }

    /// Item-local anchor point.
    #[must_use]
    pub fn anchor_point(&self) -> Vec2 {
        self.anchor_point
    }

    /// Moves the anchor point.
    pub fn set_anchor_point(&mut self, anchor_point: Vec2) {
        self.anchor_point = anchor_point;
    }

    /// Size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resizes the item.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

impl GeoMapItem for QuickItem {
    fn base(&self) -> &MapItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MapItemBase {
        &mut self.base
    }

    fn update_map_item(&mut self, map: &dyn GeoProjection) {
        if !self.base.is_attached() || !self.coordinate.is_valid() {
            return;
        }
        let bounds = Rect::from_origin_size(Point::ZERO, self.size);
        self.base.place(map, self.coordinate, self.anchor_point, bounds);
    }

    fn after_viewport_changed(&mut self, map: &dyn GeoProjection, _change: &ViewportChange) {
        self.update_map_item(map);
    }

    fn contains(&self, point: Point) -> bool {
        Rect::from_origin_size(Point::ZERO, self.size).contains(point)
    }

    fn drag_ended(&mut self, map: &dyn GeoProjection) -> bool {
        let anchor = self.base.position() + self.anchor_point;
        if !is_finite_point(anchor) {
            return false;
        }
        let coordinate = map.screen_to_coordinate(anchor, false);
        if !coordinate.is_valid() {
            return false;
        }
        self.coordinate = coordinate;
        true
    }

    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]> {
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use geomap_projection::EquirectangularMap;

    use super::*;

    #[test]
    fn anchor_sits_on_the_coordinate() {
        let map = EquirectangularMap::new(Size::new(200.0, 100.0));
        let mut item = QuickItem::new(GeoCoordinate::new(0.0, 0.0), Size::new(20.0, 30.0))
            .with_anchor_point(Vec2::new(10.0, 30.0));
        item.base_mut().set_attached(true);
        item.update_map_item(&map);

        assert_eq!(item.base().position(), Point::new(90.0, 20.0));
        assert_eq!(item.bounding_box_on_screen(), Rect::new(90.0, 20.0, 110.0, 50.0));
        assert!(item.contains(Point::new(10.0, 29.0)));
        assert!(item.render_parts().is_empty());
    }

    #[test]
    fn drag_moves_the_coordinate() {
        let mut map = EquirectangularMap::new(Size::new(200.0, 100.0));
        map.set_zoom_level(1.0);
        let mut item = QuickItem::new(GeoCoordinate::new(0.0, 0.0), Size::new(8.0, 8.0));
        item.base_mut().set_attached(true);
        item.update_map_item(&map);

        item.base_mut().set_position(Point::new(110.0, 50.0));
        assert!(item.drag_ended(&map));
        assert!(item.coordinate().longitude > 0.0);
        assert!(item.coordinate().latitude.abs() < 1e-9);
    }
}
