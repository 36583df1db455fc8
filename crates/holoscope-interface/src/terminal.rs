//! Displayed state of the Orion terminal screen.
//!
//! The screen mesh is a flat plane in its local XZ plane with +Y as its
//! normal. At rest it leans back by the inclination angle; when opened it
//! turns to face the camera.

use glam::{Mat4, Vec2, Vec3};
use holoscope_coords::{Quad, Ray};

use crate::interpolator::{InterpolatorTargets, Smoothed};

#[derive(Debug, Clone)]
pub struct TerminalState {
    pub rest_center: Vec3,
    /// Degrees.
    pub rest_yaw: f32,
    pub center: Smoothed<Vec3>,
    /// Degrees, rotation about the local Z axis.
    pub yaw: Smoothed<f32>,
    /// Degrees, rotation about the world Y axis.
    pub pitch: Smoothed<f32>,
    /// Half extents along the local X axis (vertical once opened) and the
    /// local Z axis (horizontal).
    pub half_extents: Vec2,
}

impl TerminalState {
    pub fn new(rest_center: Vec3, rest_yaw: f32, half_extents: Vec2) -> Self {
        Self {
            rest_center,
            rest_yaw,
            center: Smoothed::new(rest_center),
            yaw: Smoothed::new(rest_yaw),
            pitch: Smoothed::new(0.0),
            half_extents,
        }
    }

    pub fn update(&mut self, targets: &InterpolatorTargets, rate: f32, dt: f32) {
        self.center.retarget(targets.terminal_center);
        self.center.step(rate, dt);
        self.yaw.retarget(targets.terminal_yaw);
        self.yaw.step(rate, dt);
        self.pitch.retarget(targets.terminal_pitch);
        self.pitch.step(rate, dt);
    }

    /// `translate · Ry(pitch) · Rz(-yaw)`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center.current)
            * Mat4::from_rotation_y(self.pitch.current.to_radians())
            * Mat4::from_rotation_z(-self.yaw.current.to_radians())
    }

    /// The screen as an oriented rectangle in world space.
    pub fn screen_quad(&self) -> Quad {
        let m = self.model_matrix();
        Quad {
            center: self.center.current,
            right: m.transform_vector3(Vec3::X).normalize_or(Vec3::X),
            up: m.transform_vector3(Vec3::Z).normalize_or(Vec3::Z),
            half_extents: self.half_extents,
        }
    }

    /// Screen plane normal in world space.
    pub fn facing(&self) -> Vec3 {
        self.model_matrix().transform_vector3(Vec3::Y).normalize_or(Vec3::Y)
    }

    /// Distance along `ray` to the screen, if it hits.
    pub fn screen_hit(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_quad(&self.screen_quad())
    }
}
