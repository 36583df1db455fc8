//! Geographic coordinates and their unit-sphere directions.
//!
//! The sphere is Y-up. Longitudes are remapped into the engine's rotation
//! convention by [`engine_longitude`] before the trig, and the same function
//! maps them back on the way out.

use glam::Vec3;

use crate::angle::{clamp_latitude_deg, wrap_longitude_deg};

/// A point on the globe in degrees. Longitude is east-positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude: f32,
    /// Longitude in degrees, `[-180, 180)` once wrapped.
    pub longitude: f32,
}

impl GeoPoint {
    /// Create a point without normalising it.
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Clamp latitude and wrap longitude into range.
    #[must_use]
    pub fn wrapped(self) -> Self {
        Self {
            latitude: clamp_latitude_deg(self.latitude),
            longitude: wrap_longitude_deg(self.longitude),
        }
    }

    /// Untilted unit direction of this point.
    pub fn to_direction(self) -> Vec3 {
        geo_to_direction(self.latitude, self.longitude)
    }
}

/// Map a geographic longitude into the engine's rotation convention.
///
/// `lon >= 0` gives `180 - lon` and `lon < 0` gives `180 + |lon|`. Both
/// branches are the same line, and the map is its own inverse.
#[inline]
pub fn engine_longitude(longitude_deg: f32) -> f32 {
    180.0 - longitude_deg
}

/// Unit direction for a latitude/longitude pair, with no globe rotation.
pub fn geo_to_direction(latitude_deg: f32, longitude_deg: f32) -> Vec3 {
    let lat = latitude_deg.to_radians();
    let lon = engine_longitude(longitude_deg).to_radians();
    Vec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
}

/// Inverse of [`geo_to_direction`]. The input does not need to be unit length.
pub fn direction_to_geo(direction: Vec3) -> GeoPoint {
    let dir = direction / direction.length();
    let latitude = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
    let engine_lon = dir.z.atan2(dir.x).to_degrees();
    GeoPoint {
        latitude,
        longitude: wrap_longitude_deg(engine_longitude(engine_lon)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_longitude_matches_both_branches() {
        for lon in [0.0_f32, 12.0, 90.0, 179.0] {
            assert_eq!(engine_longitude(lon), 180.0 - lon);
        }
        for lon in [-0.5_f32, -45.0, -179.0] {
            assert_eq!(engine_longitude(lon), 180.0 + lon.abs());
        }
    }

    #[test]
    fn test_engine_longitude_is_involution() {
        for i in -18..18 {
            let lon = i as f32 * 10.0 + 3.0;
            assert!((engine_longitude(engine_longitude(lon)) - lon).abs() < 1e-4);
        }
    }

    #[test]
    fn test_direction_is_unit_length() {
        for lat_i in -9..=9 {
            for lon_i in -18..18 {
                let d = geo_to_direction(lat_i as f32 * 10.0, lon_i as f32 * 10.0);
                assert!((d.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_poles_point_along_y() {
        assert!((geo_to_direction(90.0, 37.0) - Vec3::Y).length() < 1e-5);
        assert!((geo_to_direction(-90.0, -120.0) + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_prime_meridian_points_along_neg_x() {
        // engine longitude 180° puts (0, 0) on -X.
        let d = geo_to_direction(0.0, 0.0);
        assert!((d - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_round_trip() {
        for lat_i in -8..=8 {
            for lon_i in -17..=17 {
                let lat = lat_i as f32 * 11.0;
                let lon = lon_i as f32 * 10.3;
                let back = direction_to_geo(geo_to_direction(lat, lon));
                assert!((back.latitude - lat).abs() < 1e-2, "lat {lat} -> {back:?}");
                assert!((back.longitude - lon).abs() < 1e-2, "lon {lon} -> {back:?}");
            }
        }
    }

    #[test]
    fn test_direction_to_geo_ignores_scale() {
        let d = geo_to_direction(33.0, -71.0) * 5.0;
        let p = direction_to_geo(d);
        assert!((p.latitude - 33.0).abs() < 1e-2);
        assert!((p.longitude + 71.0).abs() < 1e-2);
    }

    #[test]
    fn test_wrapped_point() {
        let p = GeoPoint::new(95.0, 200.0).wrapped();
        assert_eq!(p.latitude, 90.0);
        assert!((p.longitude + 160.0).abs() < 1e-4);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(geo_to_direction(f32::NAN, 0.0).x.is_nan());
        let p = direction_to_geo(Vec3::ZERO);
        assert!(p.latitude.is_nan());
        assert!(p.longitude.is_nan());
    }
}
