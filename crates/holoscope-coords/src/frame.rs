//! The rotating, tilted frame of the globe.
//!
//! A direction on the untilted sphere is first turned about the north axis by
//! `-yaw`, then about the secondary (X) axis by `-tilt`. An optional drag
//! pitch is added on the same secondary axis. The globe visual builds its
//! model matrix from [`GlobeFrame::rotation`], so picking, markers and the
//! drawn mesh always agree.

use glam::{Quat, Vec3};

use crate::geo::{GeoPoint, direction_to_geo, geo_to_direction};

/// Earth's axial tilt in degrees.
pub const AXIAL_TILT_DEG: f32 = 23.44;

/// Orientation of the globe. All angles are radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeFrame {
    /// Spin about the north axis.
    pub yaw: f32,
    /// Extra tilt applied by dragging while the interface is open.
    pub pitch: f32,
    /// Axial tilt.
    pub tilt: f32,
}

impl Default for GlobeFrame {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl GlobeFrame {
    /// Frame with the given yaw, Earth's tilt and no drag pitch.
    pub fn new(yaw: f32) -> Self {
        Self {
            yaw,
            pitch: 0.0,
            tilt: AXIAL_TILT_DEG.to_radians(),
        }
    }

    /// Local-to-world rotation.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch - self.tilt) * Quat::from_rotation_y(-self.yaw)
    }

    /// Rotate an untilted direction into world orientation.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }

    /// Undo the frame rotation: inverse tilt first, then inverse yaw.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation().inverse() * world
    }

    /// The globe's north axis in world orientation.
    pub fn north_axis(&self) -> Vec3 {
        self.to_world(Vec3::Y)
    }

    /// World-oriented unit direction of a geographic point.
    pub fn geo_to_direction(&self, point: GeoPoint) -> Vec3 {
        self.to_world(geo_to_direction(point.latitude, point.longitude))
    }

    /// Geographic point under a world-oriented direction.
    pub fn direction_to_geo(&self, direction: Vec3) -> GeoPoint {
        direction_to_geo(self.to_local(direction))
    }
}

/// [`geo_to_direction`] under a live globe yaw and Earth's tilt.
pub fn geo_to_direction_tilted(latitude_deg: f32, longitude_deg: f32, globe_yaw: f32) -> Vec3 {
    GlobeFrame::new(globe_yaw).geo_to_direction(GeoPoint::new(latitude_deg, longitude_deg))
}

/// Inverse of [`geo_to_direction_tilted`].
pub fn direction_tilted_to_geo(direction: Vec3, globe_yaw: f32) -> GeoPoint {
    GlobeFrame::new(globe_yaw).direction_to_geo(direction)
}
