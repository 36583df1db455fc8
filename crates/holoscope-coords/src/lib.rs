//! Geographic coordinate math for the Earth hologram.
//!
//! Everything here is a pure function of its inputs:
//!
//! - [`geo`]: latitude/longitude to unit directions and back, Y-up.
//! - [`frame`]: the same under the globe's spin and axial tilt.
//! - [`horizontal`]: azimuth/altitude to directions, for planet feeds.
//! - [`angle`]: wrap and clamp helpers.
//! - [`ray`] / [`picker`]: ray tests and turning a screen pick into a
//!   [`GeoPoint`].
//!
//! Angles are radians internally. Degrees appear only where coordinates
//! cross into the rest of the program (latitude, longitude, azimuth,
//! altitude). Invalid input is not rejected; NaN in gives NaN out.

pub mod angle;
pub mod frame;
pub mod geo;
pub mod horizontal;
pub mod picker;
pub mod ray;

pub use angle::{
    clamp_latitude_deg, wrap_degrees_360, wrap_longitude_deg, wrap_negative_two_pi,
    wrap_to_two_pi,
};
pub use frame::{AXIAL_TILT_DEG, GlobeFrame, direction_tilted_to_geo, geo_to_direction_tilted};
pub use geo::{GeoPoint, direction_to_geo, engine_longitude, geo_to_direction};
pub use horizontal::{Horizontal, direction_to_horizontal, horizontal_to_direction};
pub use picker::pick_globe;
pub use ray::{Quad, Ray, ray_sphere_intersect};
