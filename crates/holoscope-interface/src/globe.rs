//! Displayed state of the Earth hologram.

use glam::{Mat4, Vec3};
use holoscope_coords::{AXIAL_TILT_DEG, GeoPoint, GlobeFrame, Ray, pick_globe};

use crate::interpolator::{InterpolatorTargets, Smoothed};

/// Where the globe is and how it is turned. Only the globe's own update
/// mutates this; everything else reads it.
#[derive(Debug, Clone)]
pub struct GlobeState {
    /// Rest position the globe returns to when the interface closes.
    pub origin: Vec3,
    pub radius: f32,
    /// Axial tilt in radians.
    pub tilt: f32,
    pub center: Smoothed<Vec3>,
    /// Spin in radians.
    pub yaw: Smoothed<f32>,
    /// Drag pitch in radians.
    pub pitch: Smoothed<f32>,
    pub interface_active: bool,
}

impl GlobeState {
    pub fn new(origin: Vec3, radius: f32) -> Self {
        Self::with_tilt(origin, radius, AXIAL_TILT_DEG.to_radians())
    }

    pub fn with_tilt(origin: Vec3, radius: f32, tilt: f32) -> Self {
        Self {
            origin,
            radius,
            tilt,
            center: Smoothed::new(origin),
            yaw: Smoothed::new(0.0),
            pitch: Smoothed::new(0.0),
            interface_active: false,
        }
    }

    /// Ease toward the targets. Pitch only follows while the Earth interface
    /// is open.
    pub fn update(&mut self, targets: &InterpolatorTargets, rate: f32, dt: f32) {
        self.center.retarget(targets.globe_center);
        self.center.step(rate, dt);
        self.yaw.retarget(targets.globe_yaw);
        self.yaw.step(rate, dt);
        if self.interface_active {
            self.pitch.retarget(targets.globe_pitch);
            self.pitch.step(rate, dt);
        }
    }

    /// The rotation currently on screen.
    pub fn frame(&self) -> GlobeFrame {
        GlobeFrame {
            yaw: self.yaw.current,
            pitch: self.pitch.current,
            tilt: self.tilt,
        }
    }

    /// Model matrix for a unit sphere mesh.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.radius),
            self.frame().rotation(),
            self.center.current,
        )
    }

    pub fn north_axis(&self) -> Vec3 {
        self.frame().north_axis()
    }

    /// World position of a geographic point, `offset` above the surface.
    pub fn world_point(&self, point: GeoPoint, offset: f32) -> Vec3 {
        self.center.current + self.frame().geo_to_direction(point) * (self.radius + offset)
    }

    /// Distance along `ray` to the globe's bounding sphere.
    pub fn bounding_ray_hit(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_sphere(self.center.current, self.radius)
    }

    /// Geographic point under `ray`, if it hits.
    pub fn pick(&self, ray: &Ray) -> Option<GeoPoint> {
        pick_globe(ray, self.center.current, self.radius, &self.frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Vec3 = Vec3::new(-3.5, 2.0, 0.2);

    fn targets() -> InterpolatorTargets {
        InterpolatorTargets::at_rest(Vec3::ZERO, Vec3::Z, ORIGIN, Vec3::ZERO, 40.0)
    }

    #[test]
    fn test_pitch_frozen_while_closed() {
        let mut globe = GlobeState::new(ORIGIN, 0.8);
        let mut t = targets();
        t.globe_pitch = 0.4;
        t.globe_yaw = 1.0;
        globe.update(&t, 3.0, 0.1);
        assert_eq!(globe.pitch.current, 0.0);
        assert!(globe.yaw.current > 0.0);

        globe.interface_active = true;
        globe.update(&t, 3.0, 0.1);
        assert!(globe.pitch.current > 0.0);
    }

    #[test]
    fn test_world_point_on_surface() {
        let globe = GlobeState::new(ORIGIN, 0.8);
        let p = globe.world_point(GeoPoint::new(10.0, 20.0), 0.0);
        assert!((p.distance(ORIGIN) - 0.8).abs() < 1e-5);
        let m = globe.world_point(GeoPoint::new(10.0, 20.0), 0.1);
        assert!((m.distance(ORIGIN) - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_model_matrix_matches_frame() {
        let mut globe = GlobeState::new(ORIGIN, 0.8);
        globe.yaw.snap(1.2);
        let geo = GeoPoint::new(-33.0, 151.0);
        let via_matrix = globe
            .model_matrix()
            .transform_point3(geo.to_direction());
        assert!((via_matrix - globe.world_point(geo, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_pick_through_center_line() {
        let globe = GlobeState::new(ORIGIN, 0.8);
        let geo = GeoPoint::new(46.94, 6.99);
        let surface = globe.world_point(geo, 0.0);
        let eye = globe.world_point(geo, 3.0);
        let hit = globe.pick(&Ray::new(eye, surface - eye)).unwrap();
        assert!((hit.latitude - geo.latitude).abs() < 0.05);
        assert!((hit.longitude - geo.longitude).abs() < 0.05);
        assert!(globe.bounding_ray_hit(&Ray::new(eye, surface - eye)).is_some());
    }
}
