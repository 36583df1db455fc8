//! Angle wrapping and clamping helpers.
//!
//! None of these branch on the sign of the input, so interpolated values stay
//! continuous across full turns. NaN inputs come back as NaN.

use std::f32::consts::TAU;

/// Wrap radians into `[0, 2π)`.
#[inline]
pub fn wrap_to_two_pi(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Wrap radians into `(-2π, 0]`, the range used for camera yaw.
#[inline]
pub fn wrap_negative_two_pi(radians: f32) -> f32 {
    -wrap_to_two_pi(-radians)
}

/// Wrap degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees_360(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap a longitude in degrees into `[-180, 180)`.
///
/// `200` becomes `-160`, `-190` becomes `170`.
#[inline]
pub fn wrap_longitude_deg(degrees: f32) -> f32 {
    // In-range values come back bit-identical.
    if (-180.0..180.0).contains(&degrees) {
        return degrees;
    }
    wrap_degrees_360(degrees + 180.0) - 180.0
}

/// Clamp a latitude in degrees into `[-90, 90]`.
#[inline]
pub fn clamp_latitude_deg(degrees: f32) -> f32 {
    degrees.clamp(-90.0, 90.0)
}
