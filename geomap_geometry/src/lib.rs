// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geomap Geometry: screen-space geometry for map items.
//!
//! This crate turns geographic shapes into triangles under a moving map
//! viewport. It models one item's on-screen shape as a [`MapItemGeometry`]:
//! - **Source step**: coordinates are projected through a [`GeoProjection`]
//!   into offsets relative to an origin coordinate, skipping invalid input
//!   and merging points closer than [`DECIMATION_THRESHOLD`] pixels.
//! - **Screen step**: the stored source path is clipped against the current
//!   viewport and triangulated. Lines ([`PolylineGeometry`]) are clipped with
//!   [`clip_path_to_rect`] and stroked into a triangle strip with
//!   [`stroke_path`]. Fills ([`PolygonGeometry`]) are clipped with
//!   [`clip_polygon_to_rect`] and triangulated into an indexed list, or laid
//!   out as a triangle fan for circles.
//! - **Dirty flags** gate both steps: `source_dirty` for input changes,
//!   `screen_dirty` for viewport changes. The render consumer clears them
//!   with [`MapItemGeometry::mark_clean`].
//!
//! Shape helpers produce the geographic input: [`peripheral_points`] samples
//! a geodesic circle and [`rectangle_path`] walks a rectangle's corners.
//!
//! ## Minimal example
//!
//! ```rust
//! use geomap_geometry::{PolylineGeometry, StrokeStyle};
//! use geomap_projection::{EquirectangularMap, GeoCoordinate};
//! use kurbo::Size;
//!
//! let mut map = EquirectangularMap::new(Size::new(800.0, 600.0));
//! map.set_zoom_level(5.0);
//!
//! let path = [GeoCoordinate::new(0.0, -3.0), GeoCoordinate::new(1.0, 3.0)];
//! let mut line = PolylineGeometry::new();
//! line.update_source_points(&map, &path, false).unwrap();
//! line.update_screen_points(&map, &StrokeStyle::new(3.0)).unwrap();
//!
//! let geometry = line.geometry();
//! assert!(!geometry.is_empty());
//! assert!(geometry.is_screen_dirty());
//! ```
//!
//! ## Failure handling
//!
//! An update that meets a non-finite projection returns a [`GeometryError`]
//! and leaves the buffer untouched, so the item keeps its last good shape.
//! Geometry that ends up entirely off screen is not an error; the buffer is
//! simply emptied.
//!
//! [`GeoProjection`]: geomap_projection::GeoProjection

mod circle;
mod clip;
mod error;
mod geometry;
mod polygon;
mod polyline;
mod rectangle;
mod source;
mod stroke;

pub use circle::{CIRCLE_SAMPLE_COUNT, EARTH_MEAN_RADIUS_KM, peripheral_points};
pub use clip::{CLIP_NUDGE, OutCode, clip_path_to_rect, clip_polygon_to_rect, clip_segment, out_code};
pub use error::GeometryError;
pub use geometry::{DrawingMode, MapItemGeometry};
pub use polygon::PolygonGeometry;
pub use polyline::PolylineGeometry;
pub use rectangle::rectangle_path;
pub use source::DECIMATION_THRESHOLD;
pub use stroke::{
    LineCap, LineJoin, StrokeStyle, strip_outline, strip_triangles, stroke_path, triangle_contains,
};
