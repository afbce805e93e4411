// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peripheral points of a geodesic circle on a spherical Earth.

use core::f64::consts::PI;

use geomap_projection::GeoCoordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0072;

/// Number of peripheral points used for circle items.
pub const CIRCLE_SAMPLE_COUNT: usize = 125;

/// Samples `steps` points on the boundary of the circle of `radius_m`
/// meters around `center`.
///
/// The radius is treated as an angular distance on a sphere of radius
/// [`EARTH_MEAN_RADIUS_KM`]. Seen from the center, each boundary point sits
/// at altitude `90° - r` in a horizontal system; sweeping the azimuth from
/// `0` to `2π` and converting each horizontal position to the equatorial
/// system yields the boundary. Point `i` has azimuth `2π·i/steps`.
///
/// Output longitudes that overshoot the dateline by less than a full turn are
/// wrapped back into `[-180, 180]`. A circle that crosses the dateline is
/// therefore split across both edges of the longitude range; downstream
/// geometry does not stitch it back together.
///
/// Centers at or near a pole are not special-cased.
#[must_use]
pub fn peripheral_points(center: GeoCoordinate, radius_m: f64, steps: usize) -> Vec<GeoCoordinate> {
    let mut path = Vec::with_capacity(steps);

    // angular distance
    let distance = radius_m / (EARTH_MEAN_RADIUS_KM * 1000.0);

    let lat = center.latitude.to_radians();
    let lon = center.longitude.to_radians();

    let cos_h = distance.sin();
    let sin_h = distance.cos();
    let (sin_phi, cos_phi) = lat.sin_cos();
    let sin_phi_x_sin_h = sin_phi * sin_h;
    let cos_phi_x_cos_h = cos_phi * cos_h;
    let sin_phi_x_cos_h = sin_phi * cos_h;
    let cos_phi_x_sin_h = cos_phi * sin_h;

    for i in 0..steps {
        let a = 2.0 * PI * i as f64 / steps as f64;
        let (sin_a, cos_a) = a.sin_cos();
        let sin_delta = sin_phi_x_sin_h - cos_phi_x_cos_h * cos_a;
        let cos_delta_x_cos_tau = cos_phi_x_sin_h + sin_phi_x_cos_h * cos_a;
        let cos_delta_x_sin_tau = -sin_a * cos_h;
        // hour angle
        let tau = cos_delta_x_sin_tau.atan2(cos_delta_x_cos_tau);
        let cos_delta = cos_delta_x_sin_tau.hypot(cos_delta_x_cos_tau);
        // declination
        let delta = sin_delta.atan2(cos_delta);
        // right ascension with a Greenwich sidereal time of zero
        let alpha = lon - tau;

        let mut lon2 = alpha.to_degrees();
        if lon2 < -180.0 {
            lon2 += 360.0;
        } else if lon2 > 180.0 {
            lon2 -= 360.0;
        }
        path.push(GeoCoordinate {
            latitude: delta.to_degrees(),
            longitude: lon2,
            altitude: center.altitude,
        });
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn great_circle_m(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
        let (la, lb) = (a.latitude.to_radians(), b.latitude.to_radians());
        let dlat = lb - la;
        let dlon = (b.longitude - a.longitude).to_radians();
        let h = (dlat * 0.5).sin().powi(2) + la.cos() * lb.cos() * (dlon * 0.5).sin().powi(2);
        2.0 * h.sqrt().asin() * EARTH_MEAN_RADIUS_KM * 1000.0
    }

    #[test]
    fn returns_exactly_steps_points() {
        for steps in [1, 3, 4, 125, 360] {
            let pts = peripheral_points(GeoCoordinate::new(-27.0, 153.0), 5_000.0, steps);
            assert_eq!(pts.len(), steps);
            assert!(pts.iter().all(GeoCoordinate::is_valid));
        }
        assert!(peripheral_points(GeoCoordinate::new(0.0, 0.0), 10.0, 0).is_empty());
    }

    #[test]
    fn points_lie_at_the_radius() {
        let center = GeoCoordinate::new(48.2, 16.37);
        for p in peripheral_points(center, 20_000.0, CIRCLE_SAMPLE_COUNT) {
            let d = great_circle_m(center, p);
            assert!((d - 20_000.0).abs() < 1.0, "distance {d}");
        }
    }

    #[test]
    fn equatorial_circle_is_mirror_symmetric() {
        let n = 16;
        let pts = peripheral_points(GeoCoordinate::new(0.0, 0.0), 100_000.0, n);
        for i in 1..n {
            let (a, b) = (pts[i], pts[n - i]);
            assert!((a.latitude - b.latitude).abs() < 1e-9);
            assert!((a.longitude + b.longitude).abs() < 1e-9);
        }
    }

    #[test]
    fn first_point_is_due_south() {
        // Azimuth zero points away from the pole in this formulation.
        let pts = peripheral_points(GeoCoordinate::new(10.0, 20.0), 50_000.0, 8);
        assert!(pts[0].latitude < 10.0);
        assert!((pts[0].longitude - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_collapses_to_center() {
        let center = GeoCoordinate::new(-33.9, 151.2);
        for p in peripheral_points(center, 0.0, CIRCLE_SAMPLE_COUNT) {
            assert!((p.latitude - center.latitude).abs() < 1e-9);
            assert!((p.longitude - center.longitude).abs() < 1e-9);
        }
    }

    #[test]
    fn altitude_follows_the_center() {
        let center = GeoCoordinate::new(47.0, 8.0).with_altitude(1_200.0);
        let pts = peripheral_points(center, 10_000.0, 12);
        assert!(pts.iter().all(|p| p.altitude == Some(1_200.0)));

        let pts = peripheral_points(GeoCoordinate::new(47.0, 8.0), 10_000.0, 12);
        assert!(pts.iter().all(|p| p.altitude.is_none()));
    }

    #[test]
    fn dateline_crossing_wraps_longitudes() {
        let pts = peripheral_points(GeoCoordinate::new(0.0, 179.9), 50_000.0, 64);
        assert!(pts.iter().all(|p| (-180.0..=180.0).contains(&p.longitude)));
        assert!(pts.iter().any(|p| p.longitude < 0.0));
        assert!(pts.iter().any(|p| p.longitude > 0.0));
    }
}
