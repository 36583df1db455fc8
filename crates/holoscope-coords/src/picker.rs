//! Screen-space picks on the globe, turned into geographic coordinates.

use glam::Vec3;

use crate::frame::GlobeFrame;
use crate::geo::GeoPoint;
use crate::ray::Ray;

/// Intersect `ray` with the globe and return the latitude/longitude under
/// the hit, taking the globe's current rotation into account.
///
/// Returns `None` when the ray misses or the globe is entirely behind it.
pub fn pick_globe(ray: &Ray, center: Vec3, radius: f32, frame: &GlobeFrame) -> Option<GeoPoint> {
    let t = ray.intersect_sphere(center, radius)?;
    let local = (ray.at(t) - center) / radius;
    Some(frame.direction_to_geo(local))
}
