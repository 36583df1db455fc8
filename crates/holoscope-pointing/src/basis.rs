use glam::Vec3;
use holoscope_coords::GlobeFrame;

/// Cross products shorter than this are treated as parallel inputs.
const DEGENERATE_EPS: f32 = 1e-6;

/// Local west/north/up frame at a point on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonBasis {
    pub west: Vec3,
    pub north: Vec3,
    pub up: Vec3,
}

impl HorizonBasis {
    /// Basis at `viewer_dir` (unit, from the globe centre).
    ///
    /// `west = n(north_axis × viewer)`, `north = viewer × west`. At the poles
    /// `north_axis × viewer` vanishes and `secondary_axis` (any axis
    /// perpendicular to `north_axis`) stands in for it, so the result is
    /// always orthonormal.
    pub fn at(viewer_dir: Vec3, north_axis: Vec3, secondary_axis: Vec3) -> Self {
        let up = viewer_dir.normalize_or_zero();
        let mut west = north_axis.cross(up);
        if west.length() < DEGENERATE_EPS {
            tracing::debug!("viewer on the polar axis, using secondary reference axis");
            west = secondary_axis.cross(up);
        }
        let west = west.normalize_or_zero();
        let north = up.cross(west);
        Self { west, north, up }
    }

    /// Basis at `viewer_dir` using the frame's north axis, with the frame's
    /// X axis as the polar fallback.
    pub fn in_frame(viewer_dir: Vec3, frame: &GlobeFrame) -> Self {
        Self::at(viewer_dir, frame.north_axis(), frame.to_world(Vec3::X))
    }

    /// Components of `v` as `(north, up, west)`.
    pub fn project(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.north), v.dot(self.up), v.dot(self.west))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holoscope_coords::GeoPoint;

    fn assert_orthonormal(b: &HorizonBasis) {
        for v in [b.west, b.north, b.up] {
            assert!((v.length() - 1.0).abs() < 1e-5, "{b:?}");
        }
        assert!(b.west.dot(b.north).abs() < 1e-5);
        assert!(b.west.dot(b.up).abs() < 1e-5);
        assert!(b.north.dot(b.up).abs() < 1e-5);
    }

    #[test]
    fn test_equator_basis_untilted() {
        let b = HorizonBasis::at(Vec3::X, Vec3::Y, Vec3::X);
        assert_orthonormal(&b);
        assert!(b.north.distance(Vec3::Y) < 1e-6);
    }

    #[test]
    fn test_orthonormal_over_grid() {
        let frame = GlobeFrame::new(0.8);
        for lat in (-80..=80).step_by(20) {
            for lon in (-170..=170).step_by(40) {
                let dir = frame.geo_to_direction(GeoPoint::new(lat as f32, lon as f32));
                assert_orthonormal(&HorizonBasis::in_frame(dir, &frame));
            }
        }
    }

    #[test]
    fn test_north_points_toward_pole() {
        let frame = GlobeFrame::new(0.3);
        let dir = frame.geo_to_direction(GeoPoint::new(30.0, 45.0));
        let b = HorizonBasis::in_frame(dir, &frame);
        assert!(b.north.dot(frame.north_axis()) > 0.0);
    }

    #[test]
    fn test_pole_falls_back() {
        let frame = GlobeFrame::new(1.1);
        let pole = frame.north_axis();
        let b = HorizonBasis::in_frame(pole, &frame);
        assert_orthonormal(&b);
        assert!(!b.west.is_nan());
    }
}
