//! Robot angles from a target expressed in the viewer's horizon basis.

use glam::{Mat4, Vec3};
use holoscope_coords::{horizontal_to_direction, wrap_degrees_360};

use crate::basis::HorizonBasis;
use crate::motor::{MotorCommand, MotorId};

/// Mean Earth radius, used to scale satellite altitudes onto the hologram.
pub const EARTH_RADIUS_KM: f32 = 6371.0;

/// Pan offsets that line the robot's zero up with each kind of source.
const SATELLITE_PAN_OFFSET_DEG: f32 = 180.0;
const PLANET_PAN_OFFSET_DEG: f32 = 270.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointingSource {
    Satellite,
    Planet,
}

/// Latest aim for the robot. Angles are degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingSolution {
    /// Unit target direction in the local `(north, up, west)` frame.
    pub direction: Vec3,
    /// Elevation, measured up from the local horizon: 0 on the horizon,
    /// 90 straight up. [`arrow_transform`](Self::arrow_transform) tips the
    /// arrow up by this much with `Rx(-yaw)`.
    pub robot_yaw: f32,
    /// Heading in `[0, 360)`, offset for the robot's zero.
    pub robot_pitch: f32,
    pub source: PointingSource,
}

impl PointingSolution {
    fn from_local(local: Vec3, source: PointingSource) -> Self {
        let direction = local.normalize_or_zero();
        // 90° minus the zenith angle, taken through atan2 so it stays exact
        // near straight up.
        let horizontal = direction.x.hypot(direction.z);
        let robot_yaw = direction.y.atan2(horizontal).to_degrees();
        let offset = match source {
            PointingSource::Satellite => SATELLITE_PAN_OFFSET_DEG,
            PointingSource::Planet => PLANET_PAN_OFFSET_DEG,
        };
        let heading = direction.x.atan2(direction.z).to_degrees();
        let robot_pitch = wrap_degrees_360(heading + offset);
        Self {
            direction,
            robot_yaw,
            robot_pitch,
            source,
        }
    }

    /// Transform for the on-screen arrow: `T(source) · Ry(pitch) · Rx(-yaw)`.
    pub fn arrow_transform(&self, source_point: Vec3) -> Mat4 {
        Mat4::from_translation(source_point)
            * Mat4::from_rotation_y(self.robot_pitch.to_radians())
            * Mat4::from_rotation_x(-self.robot_yaw.to_radians())
    }

    /// Tilt follows the yaw, pan follows the pitch.
    pub fn motor_commands(&self) -> [MotorCommand; 2] {
        [
            MotorCommand {
                motor: MotorId::Tilt,
                angle_deg: self.robot_yaw,
            },
            MotorCommand {
                motor: MotorId::Pan,
                angle_deg: self.robot_pitch,
            },
        ]
    }
}

/// Solves robot angles for satellites and planets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingSolver {
    /// Radius of the hologram in world units.
    pub hologram_radius: f32,
}

impl PointingSolver {
    pub fn new(hologram_radius: f32) -> Self {
        Self { hologram_radius }
    }

    /// Satellite altitude in km scaled to hologram units.
    pub fn relative_altitude(&self, altitude_km: f32) -> f32 {
        self.hologram_radius * altitude_km / EARTH_RADIUS_KM
    }

    /// Aim at a satellite. `satellite_dir` is its unit direction from the
    /// globe centre, in the same orientation as `basis`.
    pub fn solve_satellite(
        &self,
        basis: &HorizonBasis,
        satellite_dir: Vec3,
        relative_altitude: f32,
    ) -> PointingSolution {
        let r = self.hologram_radius;
        let d = satellite_dir * (r + relative_altitude) - basis.up * r;
        let solution = PointingSolution::from_local(basis.project(d), PointingSource::Satellite);
        tracing::debug!(
            yaw = solution.robot_yaw,
            pitch = solution.robot_pitch,
            "satellite pointing solved"
        );
        solution
    }

    /// Aim at a planet from the azimuth/altitude reported for the viewer.
    pub fn solve_planet(&self, azimuth_deg: f32, altitude_deg: f32) -> PointingSolution {
        let local = horizontal_to_direction(azimuth_deg, altitude_deg);
        let solution = PointingSolution::from_local(local, PointingSource::Planet);
        tracing::debug!(
            yaw = solution.robot_yaw,
            pitch = solution.robot_pitch,
            "planet pointing solved"
        );
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holoscope_coords::{GeoPoint, GlobeFrame};

    fn viewer_basis(lat: f32, lon: f32) -> (HorizonBasis, GlobeFrame) {
        let frame = GlobeFrame::new(0.0);
        let dir = frame.geo_to_direction(GeoPoint::new(lat, lon));
        (HorizonBasis::in_frame(dir, &frame), frame)
    }

    #[test]
    fn test_overhead_satellite_is_yaw_90() {
        let (basis, _) = viewer_basis(0.0, 0.0);
        let solver = PointingSolver::new(0.8);
        let s = solver.solve_satellite(&basis, basis.up, solver.relative_altitude(420.0));
        assert!((s.robot_yaw - 90.0).abs() < 1e-3, "{s:?}");
        assert!((s.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_overhead_planet_is_yaw_90() {
        let s = PointingSolver::new(0.8).solve_planet(123.0, 90.0);
        assert!((s.robot_yaw - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_planet_pitch_is_azimuth_plus_offset() {
        let solver = PointingSolver::new(0.8);
        for az in [0.0_f32, 45.0, 135.0, 250.0, 359.0] {
            let s = solver.solve_planet(az, 20.0);
            let expected = wrap_degrees_360(az + 270.0);
            let diff = (s.robot_pitch - expected).abs();
            assert!(diff < 1e-2 || (diff - 360.0).abs() < 1e-2, "az {az}: {s:?}");
            assert!((s.robot_yaw - 20.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_pitch_always_in_range() {
        let (basis, frame) = viewer_basis(46.94, 6.99);
        let solver = PointingSolver::new(0.8);
        for lat in (-80..=80).step_by(16) {
            for lon in (-180..180).step_by(30) {
                let sat = frame.geo_to_direction(GeoPoint::new(lat as f32, lon as f32));
                let s = solver.solve_satellite(&basis, sat, solver.relative_altitude(420.0));
                assert!((0.0..360.0).contains(&s.robot_pitch), "{s:?}");
                assert!((-90.0..=90.0).contains(&s.robot_yaw), "{s:?}");
            }
        }
    }

    #[test]
    fn test_satellite_and_planet_headings_agree() {
        // A satellite due north and a planet at azimuth 0 share a pan angle.
        let (basis, _) = viewer_basis(0.0, 0.0);
        let solver = PointingSolver::new(0.8);
        let far_north = (basis.up * 0.8 + basis.north * 1000.0).normalize();
        let sat = solver.solve_satellite(&basis, far_north, 0.0);
        // Local (north, up, west) = (1, 0, 0): atan2(1, 0) = 90.
        assert!((sat.robot_pitch - wrap_degrees_360(90.0 + 180.0)).abs() < 0.5);
        let planet = solver.solve_planet(0.0, 0.0);
        assert!((planet.robot_pitch - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_relative_altitude() {
        let solver = PointingSolver::new(0.8);
        assert!((solver.relative_altitude(6371.0) - 0.8).abs() < 1e-6);
        assert!((solver.relative_altitude(420.0) - 0.8 * 420.0 / 6371.0).abs() < 1e-7);
    }

    #[test]
    fn test_arrow_points_up_for_overhead() {
        let s = PointingSolver::new(0.8).solve_planet(0.0, 90.0);
        let source = Vec3::new(-3.5, 4.0, 0.2);
        let m = s.arrow_transform(source);
        assert!(m.transform_point3(Vec3::ZERO).distance(source) < 1e-6);
        // Rx(-90°) takes +Z to +Y.
        let tip = m.transform_vector3(Vec3::Z);
        assert!(tip.distance(Vec3::Y) < 1e-5, "{tip:?}");
    }

    #[test]
    fn test_yaw_is_measured_from_horizon() {
        let solver = PointingSolver::new(0.8);
        assert!(solver.solve_planet(90.0, 0.0).robot_yaw.abs() < 1e-4);
        assert!((solver.solve_planet(90.0, 30.0).robot_yaw - 30.0).abs() < 1e-3);
        assert!((solver.solve_planet(90.0, -10.0).robot_yaw + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_motor_commands_carry_angles() {
        let s = PointingSolver::new(0.8).solve_planet(30.0, 45.0);
        let [tilt, pan] = s.motor_commands();
        assert_eq!(tilt.motor, MotorId::Tilt);
        assert_eq!(tilt.angle_deg, s.robot_yaw);
        assert_eq!(pan.motor, MotorId::Pan);
        assert_eq!(pan.angle_deg, s.robot_pitch);
    }
}
