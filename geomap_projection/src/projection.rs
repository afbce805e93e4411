// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

use crate::{CameraData, GeoCoordinate};

/// The projection a map exposes to its items.
///
/// Screen positions are in device pixels with the origin at the top-left of
/// the viewport and `y` growing downwards. A projection signals "undefined"
/// by returning a point with NaN components; callers must check with
/// [`is_finite_point`] before using a result.
pub trait GeoProjection {
    /// Projects a coordinate to a screen position.
    ///
    /// When `clip_to_viewport` is `true`, positions outside the viewport are
    /// reported as undefined.
    fn coordinate_to_screen(&self, coordinate: GeoCoordinate, clip_to_viewport: bool) -> Point;

    /// Projects a screen position back to a coordinate.
    ///
    /// Returns [`GeoCoordinate::INVALID`] if the position does not map to a
    /// valid coordinate, or if `clip_to_viewport` is `true` and the position
    /// lies outside the viewport.
    fn screen_to_coordinate(&self, position: Point, clip_to_viewport: bool) -> GeoCoordinate;

    /// Viewport width in pixels.
    fn width(&self) -> f64;

    /// Viewport height in pixels.
    fn height(&self) -> f64;

    /// Current camera state.
    fn camera(&self) -> CameraData;

    /// Viewport size in pixels.
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Viewport rectangle in screen coordinates, anchored at the origin.
    fn viewport_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width(), self.height())
    }
}

/// Returns `true` if both components of `p` are finite.
#[must_use]
pub fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
