//! The walking camera that circles the hologram.
//!
//! [`OrbitCamera`] turns mouse deltas into smoothed yaw/pitch rates and
//! keeps the eye inside a [`Hub`]. [`CameraProjection`] builds the matrices
//! the renderer consumes and unprojects screen points into rays for picking.

pub mod orbit_camera;
pub mod projection;

pub use orbit_camera::{
    CameraInput, CameraState, Hub, MotionConstraint, OrbitCamera, OrbitSettings,
    compass_heading_deg,
};
pub use projection::CameraProjection;
