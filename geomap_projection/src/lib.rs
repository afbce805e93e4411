// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geomap Projection: geographic coordinates and the map projection contract.
//!
//! This crate provides the small, headless pieces that every Geomap map item
//! needs in order to turn geographic input into screen space:
//! - [`GeoCoordinate`]: latitude/longitude (and optional altitude) with
//!   validity checks and dateline/pole helpers.
//! - [`CameraData`] and [`CameraChange`]: the camera state of a map and the
//!   set of properties that changed in a camera update.
//! - [`GeoProjection`]: the contract a map exposes to item geometry
//!   (`coordinate_to_screen`, `screen_to_coordinate`, viewport size).
//! - [`EquirectangularMap`]: a concrete pan/zoom/bearing projection with a
//!   simple equirectangular world mapping.
//!
//! It does **not** own any items or geometry. Higher layers keep a projection
//! next to their item collection and pass it into geometry updates.
//!
//! ## Minimal example
//!
//! ```rust
//! use geomap_projection::{EquirectangularMap, GeoCoordinate, GeoProjection};
//! use kurbo::Size;
//!
//! let mut map = EquirectangularMap::new(Size::new(800.0, 600.0));
//! map.set_center(GeoCoordinate::new(0.0, 0.0));
//! map.set_zoom_level(3.0);
//!
//! // The camera center always lands in the middle of the viewport.
//! let p = map.coordinate_to_screen(GeoCoordinate::new(0.0, 0.0), false);
//! assert!((p.x - 400.0).abs() < 1e-9);
//! assert!((p.y - 300.0).abs() < 1e-9);
//!
//! // And the inverse recovers the coordinate.
//! let c = map.screen_to_coordinate(p, false);
//! assert!(c.latitude.abs() < 1e-9 && c.longitude.abs() < 1e-9);
//! ```
//!
//! ## Undefined projections
//!
//! A projection reports "undefined" by returning a point with NaN
//! components. This happens for invalid coordinates, for an empty viewport,
//! and for off-screen results when `clip_to_viewport` is requested. Item
//! geometry checks for non-finite points and aborts instead of producing
//! garbage vertices.
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
mod coordinate;
mod equirect;
mod projection;

pub use camera::{CameraChange, CameraData, ViewportChange};
pub use coordinate::{
    GeoCoordinate, clip_latitude, is_valid_latitude, is_valid_longitude, wrap_longitude,
};
pub use equirect::EquirectangularMap;
pub use projection::{GeoProjection, is_finite_point};
