//! View and projection matrices, and screen-to-world rays.

use glam::{Mat4, Vec2, Vec3};
use holoscope_coords::Ray;

use crate::orbit_camera::CameraState;

/// Perspective lens parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProjection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl Default for CameraProjection {
    fn default() -> Self {
        Self {
            fov_y: 60f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl CameraProjection {
    /// World-to-view transform for the camera's position, target and up.
    pub fn view_matrix(&self, camera: &CameraState) -> Mat4 {
        Mat4::look_at_rh(camera.position, camera.target, camera.up)
    }

    /// Projection matrix with reverse-Z: near maps to depth 1, far to 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// `projection · view`.
    pub fn view_projection_matrix(&self, camera: &CameraState) -> Mat4 {
        self.projection_matrix() * self.view_matrix(camera)
    }

    /// Update the aspect ratio from a viewport size.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Ray from the eye through a pixel. `screen` is in pixels with the
    /// origin at the top-left, `viewport` is the window size in pixels.
    pub fn screen_ray(&self, camera: &CameraState, screen: Vec2, viewport: Vec2) -> Ray {
        let ndc_x = 2.0 * screen.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / viewport.y;

        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or(Vec3::X);
        let up = right.cross(forward);
        let half_h = (self.fov_y * 0.5).tan();
        let half_w = half_h * self.aspect_ratio;

        let dir = forward + right * (ndc_x * half_w) + up * (ndc_y * half_h);
        Ray::new(camera.position, dir)
    }

    /// Ray through the middle of the screen, i.e. along the camera forward.
    pub fn center_ray(&self, camera: &CameraState) -> Ray {
        Ray::new(camera.position, camera.forward())
    }
}
