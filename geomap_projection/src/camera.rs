// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::GeoCoordinate;

/// Camera state of a map.
///
/// Angles are in degrees. `tilt` and `roll` are tracked so that items can
/// react to them, even when the projection in use renders a flat view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraData {
    /// Geographic position at the center of the viewport.
    pub center: GeoCoordinate,
    /// Zoom level; each whole step doubles the world size in pixels.
    pub zoom_level: f64,
    /// Clockwise rotation of the map relative to north.
    pub bearing: f64,
    /// Tilt of the camera away from straight down.
    pub tilt: f64,
    /// Roll of the camera around its view axis.
    pub roll: f64,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            center: GeoCoordinate::new(0.0, 0.0),
            zoom_level: 0.0,
            bearing: 0.0,
            tilt: 0.0,
            roll: 0.0,
        }
    }
}

bitflags::bitflags! {
    /// Which parts of the camera or viewport changed in one update.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CameraChange: u8 {
        /// The camera center moved (a pan).
        const CENTER     = 0b0000_0001;
        /// The zoom level changed.
        const ZOOM_LEVEL = 0b0000_0010;
        /// The bearing changed.
        const BEARING    = 0b0000_0100;
        /// The tilt changed.
        const TILT       = 0b0000_1000;
        /// The roll changed.
        const ROLL       = 0b0001_0000;
        /// The viewport was resized.
        const SIZE       = 0b0010_0000;
    }
}

/// Notification delivered to map items after the camera or viewport changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportChange {
    /// Camera state after the change.
    pub camera: CameraData,
    /// What changed.
    pub changes: CameraChange,
}

impl ViewportChange {
    /// Returns `true` if the zoom level changed.
    #[must_use]
    pub fn zoom_level_changed(&self) -> bool {
        self.changes.contains(CameraChange::ZOOM_LEVEL)
    }

    /// Returns `true` if the bearing changed.
    #[must_use]
    pub fn bearing_changed(&self) -> bool {
        self.changes.contains(CameraChange::BEARING)
    }

    /// Returns `true` if the tilt changed.
    #[must_use]
    pub fn tilt_changed(&self) -> bool {
        self.changes.contains(CameraChange::TILT)
    }

    /// Returns `true` if the roll changed.
    #[must_use]
    pub fn roll_changed(&self) -> bool {
        self.changes.contains(CameraChange::ROLL)
    }

    /// Returns `true` if the viewport size changed.
    #[must_use]
    pub fn map_size_changed(&self) -> bool {
        self.changes.contains(CameraChange::SIZE)
    }
}
