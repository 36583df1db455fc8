//! Inertial mouse-look camera confined to a circular hub.
//!
//! Each frame [`OrbitCamera::update`] does four things:
//! 1. Applies WASD movement in the horizontal plane, moving the look
//!    target by the same amount.
//! 2. Rejects any move that leaves the [`Hub`]. The rejected move becomes
//!    a [`MotionConstraint`] and slides along the boundary when it can.
//! 3. Smooths the yaw/pitch rates toward the mouse-driven targets and
//!    integrates them.
//! 4. Rebuilds the target from yaw/pitch.
//!
//! While an interface is open the camera is instead pulled toward the
//! interpolator targets with [`OrbitCamera::follow`].

use glam::{Vec2, Vec3};
use holoscope_coords::{wrap_degrees_360, wrap_negative_two_pi};

/// Tuning for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Radians of turn rate per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// How quickly turn rates approach their targets (per second).
    pub smooth_factor: f32,
    /// Walking speed in world units per second.
    pub move_speed: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` radians.
    pub pitch_limit: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.003,
            smooth_factor: 15.0,
            move_speed: 8.0,
            pitch_limit: 1.5,
        }
    }
}

/// The region the camera may walk in: a ball around the hologram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hub {
    pub center: Vec3,
    pub radius: f32,
}

impl Hub {
    /// Strictly inside. Touching the boundary already counts as a violation.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.distance(self.center) < self.radius
    }
}

/// Produced when a move hits the hub boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConstraint {
    /// Unit horizontal tangent to the boundary at the rejected position.
    pub tangent: Vec3,
    /// `|cos|` of the angle between the intended step and the tangent.
    /// 1 means the move ran along the wall, 0 means straight into it.
    pub weight: f32,
}

/// Per-frame input for [`OrbitCamera::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    /// `x` strafes right, `y` walks forward. Each in `[-1, 1]`.
    pub move_axes: Vec2,
    /// Raw mouse motion in pixels.
    pub mouse_delta: Vec2,
}

/// Everything the camera knows about itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Heading in radians, kept in `(-2π, 0]`.
    pub yaw: f32,
    /// Elevation in radians.
    pub pitch: f32,
    pub yaw_rate: f32,
    pub pitch_rate: f32,
    /// Position at the end of the previous frame, the rollback point.
    pub previous_position: Vec3,
}

impl CameraState {
    /// A camera at `position` whose yaw and pitch point it at `look_at`.
    pub fn looking_at(position: Vec3, look_at: Vec3) -> Self {
        let dir = (look_at - position).normalize_or_zero();
        let yaw = wrap_negative_two_pi(dir.x.atan2(dir.z));
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        Self {
            position,
            target: position + look_direction(yaw, pitch),
            up: Vec3::Y,
            yaw,
            pitch,
            yaw_rate: 0.0,
            pitch_rate: 0.0,
            previous_position: position,
        }
    }

    /// Unit vector from position to target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Horizontal right vector (`forward × Y`).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }
}

/// `(cos p·sin y, sin p, cos p·cos y)`.
#[inline]
fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos())
}

/// The HUD compass value for a yaw: degrees in `[0, 360)`, growing as the
/// camera turns right.
pub fn compass_heading_deg(yaw: f32) -> f32 {
    wrap_degrees_360(-yaw.to_degrees())
}

/// Mouse-look camera with smoothed rates and a hub constraint.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub state: CameraState,
    pub settings: OrbitSettings,
}

impl OrbitCamera {
    pub fn new(state: CameraState, settings: OrbitSettings) -> Self {
        Self { state, settings }
    }

    /// Advance one frame of free movement. Returns the constraint if the
    /// move hit the hub boundary.
    pub fn update(&mut self, input: &CameraInput, hub: &Hub, dt: f32) -> Option<MotionConstraint> {
        let constraint = self.apply_movement(input.move_axes, hub, dt);
        self.apply_look(input.mouse_delta, dt);
        self.state.target = self.state.position + look_direction(self.state.yaw, self.state.pitch);
        self.state.previous_position = self.state.position;
        constraint
    }

    fn apply_movement(&mut self, axes: Vec2, hub: &Hub, dt: f32) -> Option<MotionConstraint> {
        let right = self.state.right();
        let forward = Vec3::Y.cross(right);
        let dir = right * axes.x + forward * axes.y;
        if dir.length_squared() == 0.0 {
            return None;
        }

        let step = dir.normalize() * self.settings.move_speed * dt;
        let intended = self.state.position + step;
        if hub.contains(intended) {
            self.translate(step);
            return None;
        }

        // Roll back, then try the component of the step along the wall.
        let rollback = self.state.previous_position - self.state.position;
        self.translate(rollback);

        let offset = intended - hub.center;
        let tangent = Vec3::new(-offset.z, 0.0, offset.x).normalize_or_zero();
        let weight = step.normalize_or_zero().dot(tangent).abs();

        let slide = tangent * step.dot(tangent);
        if slide.length_squared() > 0.0 && hub.contains(self.state.position + slide) {
            self.translate(slide);
        }
        tracing::trace!(
            position = ?self.state.position,
            weight,
            "camera move rejected at hub boundary"
        );
        Some(MotionConstraint { tangent, weight })
    }

    fn apply_look(&mut self, mouse_delta: Vec2, dt: f32) {
        let s = &mut self.state;
        let target_yaw_rate = -mouse_delta.x * self.settings.mouse_sensitivity;
        let target_pitch_rate = -mouse_delta.y * self.settings.mouse_sensitivity;

        let blend = (self.settings.smooth_factor * dt).min(1.0);
        s.yaw_rate += (target_yaw_rate - s.yaw_rate) * blend;
        s.pitch_rate += (target_pitch_rate - s.pitch_rate) * blend;

        s.yaw = wrap_negative_two_pi(s.yaw + s.yaw_rate);
        let limit = self.settings.pitch_limit;
        s.pitch = (s.pitch + s.pitch_rate).clamp(-limit, limit);
    }

    fn translate(&mut self, delta: Vec3) {
        self.state.position += delta;
        self.state.target += delta;
    }

    /// Ease position, target and up toward the given values. Used instead of
    /// [`update`](Self::update) while an interface drives the camera. Turn
    /// rates are zeroed so mouse-look does not resume with stale momentum.
    pub fn follow(&mut self, position: Vec3, target: Vec3, up: Vec3, rate: f32, dt: f32) {
        let t = (rate * dt).min(1.0);
        let s = &mut self.state;
        s.position = s.position.lerp(position, t);
        s.target = s.target.lerp(target, t);
        s.up = s.up.lerp(up, t).normalize_or(Vec3::Y);
        s.yaw_rate = 0.0;
        s.pitch_rate = 0.0;
        s.previous_position = s.position;
    }
}
