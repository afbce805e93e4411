// Copyright 2025 the Geomap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geomap_projection::GeoCoordinate;

/// Closed corner path of a geographic rectangle.
///
/// Walks top-left, top-right, bottom-right, bottom-left and back to
/// top-left, so the result always has five coordinates. The top-right
/// corner takes its latitude from `top_left` and its longitude from
/// `bottom_right`; the bottom-left corner the other way around. No attempt
/// is made to order the corners or to handle the antimeridian.
#[must_use]
pub fn rectangle_path(top_left: GeoCoordinate, bottom_right: GeoCoordinate) -> [GeoCoordinate; 5] {
    let top_right = GeoCoordinate::new(top_left.latitude, bottom_right.longitude);
    let bottom_left = GeoCoordinate::new(bottom_right.latitude, top_left.longitude);
    [top_left, top_right, bottom_right, bottom_left, top_left]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_corners_closed() {
        let tl = GeoCoordinate::new(10.0, 10.0);
        let br = GeoCoordinate::new(5.0, 15.0);
        let path = rectangle_path(tl, br);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], path[4]);
        assert_eq!(path[1], GeoCoordinate::new(10.0, 15.0));
        assert_eq!(path[3], GeoCoordinate::new(5.0, 10.0));

        // Along the top edge latitude holds and longitude grows; down the
        // right edge latitude falls.
        assert_eq!(path[0].latitude, path[1].latitude);
        assert!(path[1].longitude > path[0].longitude);
        assert!(path[2].latitude < path[1].latitude);
    }

    #[test]
    fn corners_are_not_reordered() {
        let path = rectangle_path(GeoCoordinate::new(0.0, 20.0), GeoCoordinate::new(10.0, 0.0));
        assert_eq!(path[1], GeoCoordinate::new(0.0, 0.0));
        assert_eq!(path[3], GeoCoordinate::new(10.0, 20.0));
    }
}
