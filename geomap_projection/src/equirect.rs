// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::{CameraChange, CameraData, GeoCoordinate, GeoProjection};

const UNDEFINED: Point = Point::new(f64::NAN, f64::NAN);

/// A map viewport using a plain equirectangular world mapping.
///
/// The whole world is a `2:1` rectangle that is `tile_size * 2^zoom` pixels
/// wide. Longitude maps linearly to `x`, latitude linearly to `y` (north
/// up). The camera center is placed in the middle of the viewport and the
/// world is rotated about that point by the negated bearing.
///
/// Tilt and roll are recorded in the camera state but do not affect the
/// flat projection.
///
/// Setters return the [`CameraChange`] they caused, which callers forward
/// to their items. An empty set means nothing changed.
#[derive(Clone, Debug)]
pub struct EquirectangularMap {
    size: Size,
    tile_size: f64,
    camera: CameraData,
    min_zoom: f64,
    max_zoom: f64,
    max_tilt: f64,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl EquirectangularMap {
    /// Creates a map with the given viewport size, centered on `(0, 0)` at
    /// zoom level `0`.
    ///
    /// - Tile size is `256` pixels.
    /// - Zoom is clamped to `[0, 20]`.
    /// - Tilt is clamped to `[0, 60]` degrees.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let mut map = Self {
            size,
            tile_size: 256.0,
            camera: CameraData::default(),
            min_zoom: 0.0,
            max_zoom: 20.0,
            max_tilt: 60.0,
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        map.rebuild_transforms();
        map
    }

    /// Sets the tile size, which is the world width in pixels at zoom `0`.
    ///
    /// Non-positive values are ignored.
    pub fn set_tile_size(&mut self, tile_size: f64) -> CameraChange {
        if tile_size <= 0.0 || tile_size == self.tile_size {
            return CameraChange::empty();
        }
        self.tile_size = tile_size;
        self.rebuild_transforms();
        CameraChange::ZOOM_LEVEL
    }

    /// Returns the tile size in pixels.
    #[must_use]
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Sets the minimum and maximum zoom levels.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom level is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) -> CameraChange {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom_level(self.camera.zoom_level)
    }

    /// Returns the minimum zoom level.
    #[must_use]
    pub fn minimum_zoom_level(&self) -> f64 {
        self.min_zoom
    }

    /// Returns the maximum zoom level.
    #[must_use]
    pub fn maximum_zoom_level(&self) -> f64 {
        self.max_zoom
    }

    /// Sets the viewport size in pixels.
    pub fn set_size(&mut self, size: Size) -> CameraChange {
        if self.size == size {
            return CameraChange::empty();
        }
        self.size = size;
        self.rebuild_transforms();
        CameraChange::SIZE
    }

    /// Moves the camera to `center`. Invalid coordinates are ignored.
    pub fn set_center(&mut self, center: GeoCoordinate) -> CameraChange {
        if !center.is_valid() || self.camera.center == center {
            return CameraChange::empty();
        }
        self.camera.center = center;
        self.rebuild_transforms();
        CameraChange::CENTER
    }

    /// Sets the zoom level, clamping it into the configured range.
    pub fn set_zoom_level(&mut self, zoom_level: f64) -> CameraChange {
        let clamped = zoom_level.clamp(self.min_zoom, self.max_zoom);
        if (self.camera.zoom_level - clamped).abs() < f64::EPSILON {
            return CameraChange::empty();
        }
        self.camera.zoom_level = clamped;
        self.rebuild_transforms();
        CameraChange::ZOOM_LEVEL
    }

    /// Sets the bearing in degrees.
    pub fn set_bearing(&mut self, bearing: f64) -> CameraChange {
        if !bearing.is_finite() || self.camera.bearing == bearing {
            return CameraChange::empty();
        }
        self.camera.bearing = bearing;
        self.rebuild_transforms();
        CameraChange::BEARING
    }

    /// Sets the tilt in degrees, clamped to `[0, 60]`.
    pub fn set_tilt(&mut self, tilt: f64) -> CameraChange {
        let clamped = tilt.clamp(0.0, self.max_tilt);
        if self.camera.tilt == clamped {
            return CameraChange::empty();
        }
        self.camera.tilt = clamped;
        CameraChange::TILT
    }

    /// Sets the roll in degrees.
    pub fn set_roll(&mut self, roll: f64) -> CameraChange {
        if !roll.is_finite() || self.camera.roll == roll {
            return CameraChange::empty();
        }
        self.camera.roll = roll;
        CameraChange::ROLL
    }

    /// Pans the camera by a delta in screen space.
    ///
    /// The move is ignored if it would put the camera center off the world.
    pub fn pan_by(&mut self, delta: Vec2) -> CameraChange {
        if delta == Vec2::ZERO {
            return CameraChange::empty();
        }
        let target = self.view_center() + delta;
        let center = self.screen_to_coordinate(target, false);
        self.set_center(center)
    }

    /// Returns the world width in pixels at the current zoom level.
    #[must_use]
    pub fn world_width(&self) -> f64 {
        self.tile_size * 2.0_f64.powf(self.camera.zoom_level)
    }

    fn view_center(&self) -> Point {
        Point::new(self.size.width * 0.5, self.size.height * 0.5)
    }

    fn is_ready(&self) -> bool {
        self.size.width > 0.0 && self.size.height > 0.0
    }

    fn coordinate_to_world(&self, coordinate: GeoCoordinate) -> Point {
        let w = self.world_width();
        Point::new(
            (coordinate.longitude + 180.0) / 360.0 * w,
            (90.0 - coordinate.latitude) / 180.0 * (w * 0.5),
        )
    }

    fn world_to_coordinate(&self, p: Point) -> GeoCoordinate {
        let w = self.world_width();
        GeoCoordinate::new(90.0 - p.y / (w * 0.5) * 180.0, p.x / w * 360.0 - 180.0)
    }

    fn rebuild_transforms(&mut self) {
        let view_center = self.view_center();
        let center_world = self.coordinate_to_world(self.camera.center);
        // World → view: bring the camera center to the view center, then
        // rotate the map about it so that `bearing` points up.
        self.world_to_view = Affine::rotate_about(-self.camera.bearing.to_radians(), view_center)
            * Affine::translate(view_center - center_world);
        self.view_to_world = self.world_to_view.inverse();
    }

    fn in_viewport(&self, p: Point) -> bool {
        let rect = Rect::from_origin_size(Point::ORIGIN, self.size);
        p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
    }
}

impl GeoProjection for EquirectangularMap {
    fn coordinate_to_screen(&self, coordinate: GeoCoordinate, clip_to_viewport: bool) -> Point {
        if !coordinate.is_valid() || !self.is_ready() {
            return UNDEFINED;
        }
        let p = self.world_to_view * self.coordinate_to_world(coordinate);
        if clip_to_viewport && !self.in_viewport(p) {
            return UNDEFINED;
        }
        p
    }

    fn screen_to_coordinate(&self, position: Point, clip_to_viewport: bool) -> GeoCoordinate {
        if !self.is_ready() || (clip_to_viewport && !self.in_viewport(position)) {
            return GeoCoordinate::INVALID;
        }
        let coordinate = self.world_to_coordinate(self.view_to_world * position);
        if coordinate.is_valid() {
            coordinate
        } else {
            GeoCoordinate::INVALID
        }
    }

    fn width(&self) -> f64 {
        self.size.width
    }

    fn height(&self) -> f64 {
        self.size.height
    }

    fn camera(&self) -> CameraData {
        self.camera
    }
}
