//! Horizon (azimuth/altitude) coordinates.
//!
//! Azimuth is measured from +Z toward +X, altitude up from the XZ plane.
//! Planet positions arrive in this form and are placed in the same 3D space
//! as satellite directions through [`horizontal_to_direction`].

use glam::Vec3;

use crate::angle::wrap_degrees_360;

/// Azimuth/altitude pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Horizontal {
    /// Azimuth in degrees, `[0, 360)`.
    pub azimuth: f32,
    /// Altitude above the horizon in degrees, `[-90, 90]`.
    pub altitude: f32,
}

/// `(cos(alt)·sin(az), sin(alt), cos(alt)·cos(az))`.
pub fn horizontal_to_direction(azimuth_deg: f32, altitude_deg: f32) -> Vec3 {
    let az = azimuth_deg.to_radians();
    let alt = altitude_deg.to_radians();
    Vec3::new(alt.cos() * az.sin(), alt.sin(), alt.cos() * az.cos())
}

/// Inverse of [`horizontal_to_direction`].
pub fn direction_to_horizontal(direction: Vec3) -> Horizontal {
    let dir = direction / direction.length();
    Horizontal {
        azimuth: wrap_degrees_360(dir.x.atan2(dir.z).to_degrees()),
        altitude: dir.y.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}
