// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_projection::{
    CameraChange, CameraData, EquirectangularMap, GeoCoordinate, GeoProjection, ViewportChange,
};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::collection::{ItemId, MapItem, MapItemCollection};
use crate::item::GeoMapItem;
use crate::node::GeometryNode;

/// A map: a projection, the items on it, and their render nodes.
///
/// Every camera setter forwards the resulting [`CameraChange`] to all items,
/// which dirty and recompute their geometry as needed. Render nodes are only
/// refreshed by [`sync_nodes`](Self::sync_nodes).
#[derive(Clone, Debug)]
pub struct GeoMap {
    map: EquirectangularMap,
    items: MapItemCollection,
    nodes: HashMap<ItemId, SmallVec<[GeometryNode; 2]>>,
}

impl GeoMap {
    /// Creates an empty map with the given viewport size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::with_projection(EquirectangularMap::new(size))
    }

    /// Creates an empty map around an already configured projection.
    #[must_use]
    pub fn with_projection(map: EquirectangularMap) -> Self {
        Self {
            map,
            items: MapItemCollection::new(),
            nodes: HashMap::new(),
        }
    }

    /// The projection.
    #[must_use]
    pub fn projection(&self) -> &EquirectangularMap {
        &self.map
    }

    /// Current camera state.
    #[must_use]
    pub fn camera(&self) -> CameraData {
        self.map.camera()
    }

    /// Resizes the viewport.
    pub fn set_size(&mut self, size: Size) {
        let change = self.map.set_size(size);
        self.notify(change);
    }

    /// Moves the camera. Invalid coordinates are ignored.
    pub fn set_center(&mut self, center: GeoCoordinate) {
        let change = self.map.set_center(center);
        self.notify(change);
    }

    /// Sets the zoom level, clamped to the zoom limits.
    pub fn set_zoom_level(&mut self, zoom_level: f64) {
        let change = self.map.set_zoom_level(zoom_level);
        self.notify(change);
    }

    /// Sets the zoom limits.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let change = self.map.set_zoom_limits(min_zoom, max_zoom);
        self.notify(change);
    }

    /// Sets the bearing in degrees.
    pub fn set_bearing(&mut self, bearing: f64) {
        let change = self.map.set_bearing(bearing);
        self.notify(change);
    }

    /// Sets the tilt in degrees.
    pub fn set_tilt(&mut self, tilt: f64) {
        let change = self.map.set_tilt(tilt);
        self.notify(change);
    }

    /// Sets the roll in degrees.
    pub fn set_roll(&mut self, roll: f64) {
        let change = self.map.set_roll(roll);
        self.notify(change);
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        let change = self.map.pan_by(delta);
        self.notify(change);
    }

    fn notify(&mut self, changes: CameraChange) {
        if changes.is_empty() {
            return;
        }
        let change = ViewportChange {
            camera: self.map.camera(),
            changes,
        };
        for (_, item) in self.items.iter_mut() {
            item.after_viewport_changed(&self.map, &change);
        }
    }

    /// Adds `item` to the map and computes its geometry.
    pub fn add_map_item(&mut self, item: impl Into<MapItem>) -> ItemId {
        let mut item = item.into();
        item.base_mut().set_attached(true);
        // Geometry left over from an earlier map is stale.
        let refresh = ViewportChange {
            camera: self.map.camera(),
            changes: CameraChange::all(),
        };
        item.after_viewport_changed(&self.map, &refresh);
        self.items.insert(item)
    }

    /// Removes an item from the map and drops its render nodes.
    pub fn remove_map_item(&mut self, id: ItemId) -> Option<MapItem> {
        let mut item = self.items.remove(id)?;
        item.base_mut().set_attached(false);
        self.nodes.remove(&id);
        Some(item)
    }

    /// Removes every item.
    pub fn clear_map_items(&mut self) -> Vec<(ItemId, MapItem)> {
        self.nodes.clear();
        let mut items = self.items.clear();
        for (_, item) in &mut items {
            item.base_mut().set_attached(false);
        }
        items
    }

    /// The items on the map.
    #[must_use]
    pub fn map_items(&self) -> &MapItemCollection {
        &self.items
    }

    /// The item with `id`.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&MapItem> {
        self.items.get(id)
    }

    /// Runs `edit` on an item, then brings its geometry up to date.
    pub fn edit_item<R>(
        &mut self,
        id: ItemId,
        edit: impl FnOnce(&mut MapItem) -> R,
    ) -> Option<R> {
        let item = self.items.get_mut(id)?;
        let result = edit(item);
        item.update_map_item(&self.map);
        Some(result)
    }

    /// Moves an item on screen by `delta`, as an interactive drag does.
    ///
    /// The item's geographic data is untouched until [`end_drag`](Self::end_drag).
    pub fn drag_item(&mut self, id: ItemId, delta: Vec2) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        let base = item.base_mut();
        base.set_position(base.position() + delta);
        true
    }

    /// Commits a drag. Returns `false` if the item refused it, in which case
    /// it snaps back to its geographic position.
    pub fn end_drag(&mut self, id: ItemId) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        let accepted = item.drag_ended(&self.map);
        item.update_map_item(&self.map);
        accepted
    }

    /// The topmost visible item under a screen point. Later additions are
    /// on top.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|(_, item)| item.is_visible())
            .filter(|(_, item)| item.contains(point - item.base().position().to_vec2()))
            .map(|(id, _)| id)
            .max()
    }

    /// Copies changed geometry into render nodes. Returns `true` if any node
    /// was re-uploaded.
    pub fn sync_nodes(&mut self) -> bool {
        let mut uploaded = false;
        for (id, item) in self.items.iter_mut() {
            let parts = item.render_parts();
            let nodes = self.nodes.entry(id).or_default();
            nodes.resize_with(parts.len(), GeometryNode::default);
            for (node, part) in nodes.iter_mut().zip(parts) {
                uploaded |= node.update(part);
            }
        }
        uploaded
    }

    /// Render nodes of an item, in drawing order.
    #[must_use]
    pub fn nodes(&self, id: ItemId) -> &[GeometryNode] {
        self.nodes.get(&id).map(|nodes| nodes.as_slice()).unwrap_or_default()
    }

    /// Centers and zooms the camera so that every placed item fits the
    /// viewport.
    ///
    /// Fixed-size items keep their pixel size while the map zooms, so they
    /// are left out of the first fit and taken into account by a second,
    /// refining pass.
    pub fn fit_viewport_to_map_items(&mut self) {
        self.fit_viewport_to_map_items_refine(true);
    }

    fn fit_viewport_to_map_items_refine(&mut self, refine: bool) {
        if self.items.is_empty() {
            return;
        }
        let mut has_quick_item = false;
        let mut bounds: Option<Rect> = None;
        for (_, item) in self.items.iter() {
            if refine && matches!(item, MapItem::Quick(_)) {
                has_quick_item = true;
                continue;
            }
            if !item.base().is_placed() {
                continue;
            }
            let b = item.bounding_box_on_screen();
            bounds = Some(bounds.map_or(b, |u| u.union(b)));
        }
        let Some(bounds) = bounds else {
            if has_quick_item {
                self.fit_viewport_to_map_items_refine(false);
            }
            return;
        };

        let center = self.map.screen_to_coordinate(bounds.center(), false);
        self.set_center(center);

        let (width, height) = (self.map.width(), self.map.height());
        let ratio = if bounds.width() / (bounds.width() + bounds.height())
            > width / (width + height)
        {
            bounds.width() / width
        } else {
            bounds.height() / height
        };
        if ratio.is_finite() && ratio > 0.0 {
            let zoom = self.map.camera().zoom_level + ratio.log10() / 0.5_f64.log10();
            let zoom = zoom.max(self.map.minimum_zoom_level()).floor();
            self.set_zoom_level(zoom);
        } else {
            log::debug!("map items have no extent; only recentering");
        }

        if has_quick_item {
            self.fit_viewport_to_map_items_refine(false);
        }
    }
}
