// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Reasons a geometry update was abandoned.
///
/// An update that returns one of these leaves the buffer exactly as it was
/// before the call, so the item keeps rendering its last good geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryError {
    /// The map projected a coordinate to a NaN or infinite screen position.
    NonFiniteProjection,
    /// The path did not contain a single valid coordinate.
    NoValidCoordinates,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteProjection => {
                f.write_str("map projection produced a non-finite screen position")
            }
            Self::NoValidCoordinates => f.write_str("path contains no valid coordinate"),
        }
    }
}

impl core::error::Error for GeometryError {}
