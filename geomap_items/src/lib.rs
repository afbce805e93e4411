// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geomap Items: geographic shapes that follow a map camera.
//!
//! Each item owns its geographic data and one or two geometry buffers from
//! `geomap_geometry`. Changing the data dirties the source geometry;
//! changing the camera dirties the screen geometry (and, for zoom, bearing,
//! size and noticeable tilt or roll, the source geometry too). An update then
//! recomputes only what is dirty and positions the item on screen.
//!
//! The item kinds are:
//! - [`CircleItem`]: a geodesic circle, filled as a triangle fan.
//! - [`PolygonItem`]: a filled ring, clipped and triangulated.
//! - [`RectangleItem`]: a filled rectangle between two corners.
//! - [`PolylineItem`]: a stroked open line.
//! - [`RouteItem`]: a stroked, shared [`GeoRoute`].
//! - [`QuickItem`]: a fixed-size screen item pinned to a coordinate.
//!
//! All of them implement [`GeoMapItem`], and [`MapItem`] wraps any of them so
//! that a [`GeoMap`] can hold them together. The map forwards camera changes,
//! fits its viewport to the items, hit tests them, and copies their geometry
//! into [`GeometryNode`]s for rendering.
//!
//! ## Minimal example
//!
//! ```rust
//! use geomap_items::{CircleItem, GeoMap, GeoMapItem};
//! use geomap_projection::GeoCoordinate;
//! use kurbo::Size;
//! use peniko::Color;
//!
//! let mut map = GeoMap::new(Size::new(800.0, 600.0));
//! map.set_zoom_level(4.0);
//!
//! let mut circle = CircleItem::new(GeoCoordinate::new(0.0, 0.0), 300_000.0);
//! circle.set_color(Color::WHITE);
//! let id = map.add_map_item(circle);
//! assert!(map.item(id).unwrap().is_visible());
//!
//! // Rendering copies the geometry out and marks it clean.
//! assert!(map.sync_nodes());
//! assert_eq!(map.nodes(id).len(), 2);
//! assert!(!map.sync_nodes());
//!
//! // Panning only moves the item; the render nodes are refreshed again.
//! map.pan_by(kurbo::Vec2::new(100.0, 0.0));
//! assert!(map.sync_nodes());
//! ```
//!
//! ## Dragging
//!
//! A drag moves an item on screen with [`GeoMap::drag_item`] and commits it
//! with [`GeoMap::end_drag`], which writes the new position back into the
//! item's coordinates. Polylines and routes refuse and snap back.

mod circle;
mod collection;
mod item;
mod line;
mod map;
mod node;
mod path;
mod polygon;
mod polyline;
mod quick;
mod rectangle;
mod route;
mod shape;

pub use circle::CircleItem;
pub use collection::{ItemId, MapItem, MapItemCollection};
pub use item::{GeoMapItem, MapItemBase, RenderPart, change_needs_source_update};
pub use line::LineProperties;
pub use map::GeoMap;
pub use node::GeometryNode;
pub use path::GeoPath;
pub use polygon::PolygonItem;
pub use polyline::PolylineItem;
pub use quick::QuickItem;
pub use rectangle::RectangleItem;
pub use route::{GeoBounds, GeoRoute, RouteItem};
