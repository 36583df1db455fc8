//! Values that ease toward a target instead of snapping.

use glam::Vec3;

/// Linear blend plus a distance, enough to smooth and to test convergence.
pub trait Lerp: Copy {
    fn lerp_to(self, other: Self, t: f32) -> Self;
    fn distance_to(self, other: Self) -> f32;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    fn distance_to(self, other: Self) -> f32 {
        (other - self).abs()
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }

    #[inline]
    fn distance_to(self, other: Self) -> f32 {
        self.distance(other)
    }
}

/// A value and the target it is easing toward.
///
/// Retargeting mid-transition is always allowed; the next
/// [`step`](Self::step) simply heads for the new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed<T> {
    pub current: T,
    pub target: T,
}

impl<T: Lerp> Smoothed<T> {
    /// Settled at `value`.
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    pub fn retarget(&mut self, target: T) {
        self.target = target;
    }

    /// Jump to `value` with no transition.
    pub fn snap(&mut self, value: T) {
        self.current = value;
        self.target = value;
    }

    /// `current ← lerp(current, target, min(rate·dt, 1))`.
    pub fn step(&mut self, rate: f32, dt: f32) -> T {
        let t = (rate * dt).clamp(0.0, 1.0);
        self.current = self.current.lerp_to(self.target, t);
        self.current
    }

    /// Remaining distance to the target.
    pub fn remaining(&self) -> f32 {
        self.current.distance_to(self.target)
    }

    /// Whether the transition is visually finished.
    pub fn has_converged(&self, epsilon: f32) -> bool {
        self.remaining() < epsilon
    }
}

/// The desired values written by the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatorTargets {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub camera_up: Vec3,
    pub globe_center: Vec3,
    /// Radians.
    pub globe_yaw: f32,
    /// Radians.
    pub globe_pitch: f32,
    pub terminal_center: Vec3,
    /// Degrees.
    pub terminal_yaw: f32,
    /// Degrees.
    pub terminal_pitch: f32,
}

impl InterpolatorTargets {
    /// Targets that leave everything where it is: camera at its current
    /// pose, globe and terminal at rest.
    pub fn at_rest(
        camera_position: Vec3,
        camera_target: Vec3,
        globe_origin: Vec3,
        terminal_center: Vec3,
        terminal_yaw: f32,
    ) -> Self {
        Self {
            camera_position,
            camera_target,
            camera_up: Vec3::Y,
            globe_center: globe_origin,
            globe_yaw: 0.0,
            globe_pitch: 0.0,
            terminal_center,
            terminal_yaw,
            terminal_pitch: 0.0,
        }
    }
}
