// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_projection::{GeoProjection, ViewportChange};
use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use crate::circle::CircleItem;
use crate::item::{GeoMapItem, MapItemBase, RenderPart};
use crate::polygon::PolygonItem;
use crate::polyline::PolylineItem;
use crate::quick::QuickItem;
use crate::rectangle::RectangleItem;
use crate::route::RouteItem;

/// Handle to an item in a [`MapItemCollection`].
///
/// Ids are never reused within one collection, so a stale id simply finds
/// nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(u64);

impl ItemId {
    /// Returns the raw numeric id.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Any item a map can hold.
#[derive(Clone, Debug)]
#[expect(
    clippy::large_enum_variant,
    reason = "items are stored once in the collection and rarely moved"
)]
pub enum MapItem {
    /// A geodesic circle.
    Circle(CircleItem),
    /// A filled polygon.
    Polygon(PolygonItem),
    /// An open line.
    Polyline(PolylineItem),
    /// A filled rectangle.
    Rectangle(RectangleItem),
    /// A displayed route.
    Route(RouteItem),
    /// A fixed-size screen item.
    Quick(QuickItem),
}

macro_rules! dispatch {
    ($self:expr, $item:ident => $body:expr) => {
        match $self {
            MapItem::Circle($item) => $body,
            MapItem::Polygon($item) => $body,
            MapItem::Polyline($item) => $body,
            MapItem::Rectangle($item) => $body,
            MapItem::Route($item) => $body,
            MapItem::Quick($item) => $body,
        }
    };
}

impl GeoMapItem for MapItem {
    fn base(&self) -> &MapItemBase {
        dispatch!(self, item => item.base())
    }

    fn base_mut(&mut self) -> &mut MapItemBase {
        dispatch!(self, item => item.base_mut())
    }

    fn update_map_item(&mut self, map: &dyn GeoProjection) {
        dispatch!(self, item => item.update_map_item(map));
    }

    fn after_viewport_changed(&mut self, map: &dyn GeoProjection, change: &ViewportChange) {
        dispatch!(self, item => item.after_viewport_changed(map, change));
    }

    fn contains(&self, point: Point) -> bool {
        dispatch!(self, item => item.contains(point))
    }

    fn drag_ended(&mut self, map: &dyn GeoProjection) -> bool {
        dispatch!(self, item => item.drag_ended(map))
    }

    fn render_parts(&mut self) -> SmallVec<[RenderPart<'_>; 2]> {
        dispatch!(self, item => item.render_parts())
    }
}

macro_rules! impl_from_item {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for MapItem {
                fn from(item: $ty) -> Self {
                    Self::$variant(item)
                }
            }
        )*
    };
}

impl_from_item!(
    Circle(CircleItem),
    Polygon(PolygonItem),
    Polyline(PolylineItem),
    Rectangle(RectangleItem),
    Route(RouteItem),
    Quick(QuickItem),
);

/// The items owned by one map, keyed by [`ItemId`].
///
/// Iteration order is unspecified. Adding or removing items needs `&mut`
/// access, so it can never overlap an iteration.
#[derive(Clone, Debug, Default)]
pub struct MapItemCollection {
    items: HashMap<ItemId, MapItem>,
    next_id: u64,
}

impl MapItemCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `item` and returns its id.
    pub fn insert(&mut self, item: MapItem) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    /// Removes and returns the item with `id`.
    pub fn remove(&mut self, id: ItemId) -> Option<MapItem> {
        self.items.remove(&id)
    }

    /// The item with `id`.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&MapItem> {
        self.items.get(&id)
    }

    /// The item with `id`, mutably.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut MapItem> {
        self.items.get_mut(&id)
    }

    /// All items with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &MapItem)> + '_ {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// All items with their ids, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut MapItem)> + '_ {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes and returns every item.
    pub fn clear(&mut self) -> Vec<(ItemId, MapItem)> {
        self.items.drain().collect()
    }
}
