// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_projection::GeoCoordinate;

/// An editable, ordered list of coordinates.
///
/// Every mutator reports whether the path changed so that the owning item
/// knows when to dirty its geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoPath {
    coordinates: Vec<GeoCoordinate>,
}

impl GeoPath {
    /// Creates a path from `coordinates`.
    #[must_use]
    pub fn new(coordinates: Vec<GeoCoordinate>) -> Self {
        Self { coordinates }
    }

    /// The coordinates in order.
    #[must_use]
    pub fn coordinates(&self) -> &[GeoCoordinate] {
        &self.coordinates
    }

    /// Number of coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns `true` if the path has no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Replaces every coordinate. NaN components, as in
    /// [`GeoCoordinate::INVALID`], compare equal to each other.
    pub fn set(&mut self, coordinates: Vec<GeoCoordinate>) -> bool {
        if self.coordinates.len() == coordinates.len()
            && self.coordinates.iter().zip(&coordinates).all(|(a, b)| same_coordinate(*a, *b))
        {
            return false;
        }
        self.coordinates = coordinates;
        true
    }

    /// Appends `coordinate`.
    pub fn push(&mut self, coordinate: GeoCoordinate) -> bool {
        self.coordinates.push(coordinate);
        true
    }

    /// Inserts `coordinate` before `index`. Out-of-range indices are
    /// rejected.
    pub fn insert(&mut self, index: usize, coordinate: GeoCoordinate) -> bool {
        if index > self.coordinates.len() {
            log::warn!("insert index {index} out of range for path of {}", self.len());
            return false;
        }
        self.coordinates.insert(index, coordinate);
        true
    }

    /// Replaces the coordinate at `index`.
    pub fn replace(&mut self, index: usize, coordinate: GeoCoordinate) -> bool {
        let Some(slot) = self.coordinates.get_mut(index) else {
            log::warn!("replace index {index} out of range for path of {}", self.len());
            return false;
        };
        if same_coordinate(*slot, coordinate) {
            return false;
        }
        *slot = coordinate;
        true
    }

    /// Removes the last occurrence of `coordinate`.
    pub fn remove(&mut self, coordinate: GeoCoordinate) -> bool {
        let Some(index) = self.coordinates.iter().rposition(|c| *c == coordinate) else {
            log::warn!("cannot remove a coordinate that is not on the path");
            return false;
        };
        self.coordinates.remove(index);
        true
    }

    /// Removes the coordinate at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<GeoCoordinate> {
        if index >= self.coordinates.len() {
            log::warn!("remove index {index} out of range for path of {}", self.len());
            return None;
        }
        Some(self.coordinates.remove(index))
    }

    /// The coordinate at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<GeoCoordinate> {
        self.coordinates.get(index).copied()
    }

    /// Returns `true` if `coordinate` is on the path.
    #[must_use]
    pub fn contains(&self, coordinate: GeoCoordinate) -> bool {
        self.coordinates.contains(&coordinate)
    }

    /// Returns `true` if at least one coordinate is valid.
    #[must_use]
    pub fn has_valid_coordinate(&self) -> bool {
        self.coordinates.iter().any(GeoCoordinate::is_valid)
    }

    /// Mutable access for whole-path transforms such as a drag.
    pub(crate) fn coordinates_mut(&mut self) -> &mut [GeoCoordinate] {
        &mut self.coordinates
    }
}

/// Equality that treats NaN components as equal, so re-setting an invalid
/// coordinate is not a change.
fn same_coordinate(a: GeoCoordinate, b: GeoCoordinate) -> bool {
    fn same(x: f64, y: f64) -> bool {
        x == y || (x.is_nan() && y.is_nan())
    }
    let altitude = match (a.altitude, b.altitude) {
        (Some(x), Some(y)) => same(x, y),
        (None, None) => true,
        _ => false,
    };
    same(a.latitude, b.latitude) && same(a.longitude, b.longitude) && altitude
}

impl From<Vec<GeoCoordinate>> for GeoPath {
    fn from(coordinates: Vec<GeoCoordinate>) -> Self {
        Self::new(coordinates)
    }
}
