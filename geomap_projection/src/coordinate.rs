// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A geographic position in degrees, with an optional altitude in meters.
///
/// A coordinate is valid when its latitude lies in `[-90, 90]` and its
/// longitude lies in `[-180, 180]`. Any NaN component makes it invalid.
/// Altitude is carried along but never used by item geometry.
///
/// The default value is [`GeoCoordinate::INVALID`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Altitude in meters above the reference surface, if known.
    pub altitude: Option<f64>,
}

impl GeoCoordinate {
    /// A coordinate that is never valid.
    pub const INVALID: Self = Self {
        latitude: f64::NAN,
        longitude: f64::NAN,
        altitude: None,
    };

    /// Creates a coordinate without altitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Returns a copy of this coordinate with the given altitude.
    #[must_use]
    pub const fn with_altitude(self, altitude: f64) -> Self {
        Self {
            altitude: Some(altitude),
            ..self
        }
    }

    /// Returns `true` if both latitude and longitude are in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_latitude(self.latitude) && is_valid_longitude(self.longitude)
    }
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Returns `true` if `lat` lies in `[-90, 90]`.
#[must_use]
pub fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

/// Returns `true` if `lon` lies in `[-180, 180]`.
#[must_use]
pub fn is_valid_longitude(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon)
}

/// Brings a longitude that overshot the dateline by less than a full turn
/// back into `[-180, 180]`.
#[must_use]
pub fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Clamps a latitude to the poles.
#[must_use]
pub fn clip_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}
