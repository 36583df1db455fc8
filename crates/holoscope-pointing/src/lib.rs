//! Aiming the Orion robot.
//!
//! A [`HorizonBasis`] is built at the viewer's position on the globe. The
//! target (a satellite position or a planet's azimuth/altitude) is
//! expressed in it, and [`PointingSolver`] turns the result into the two
//! robot angles, the on-screen arrow, and motor step commands.

pub mod basis;
pub mod motor;
pub mod solver;
pub mod target;

pub use basis::HorizonBasis;
pub use motor::{MotorCommand, MotorId, MotorSettings};
pub use solver::{EARTH_RADIUS_KM, PointingSolution, PointingSolver, PointingSource};
pub use target::{AstralTarget, TargetParseError};
