//! Stepper motor commands for the two robot axes.

use serde::{Deserialize, Serialize};

/// The robot's two stepper motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorId {
    /// Elevation axis, wired as M2.
    Tilt,
    /// Heading axis, wired as M3.
    Pan,
}

impl MotorId {
    /// Name on the motor controller.
    pub fn wire_name(self) -> &'static str {
        match self {
            MotorId::Tilt => "M2",
            MotorId::Pan => "M3",
        }
    }
}

/// Conversion from angles to steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorSettings {
    pub steps_per_revolution: f32,
    pub invert_pan: bool,
}

impl Default for MotorSettings {
    fn default() -> Self {
        Self {
            steps_per_revolution: 1000.0,
            invert_pan: true,
        }
    }
}

impl MotorSettings {
    pub fn steps_for(&self, command: &MotorCommand) -> i32 {
        let invert = self.invert_pan && command.motor == MotorId::Pan;
        command.steps(self.steps_per_revolution, invert)
    }
}

/// Absolute angle for one motor, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorCommand {
    pub motor: MotorId,
    pub angle_deg: f32,
}

impl MotorCommand {
    /// `trunc(steps_per_revolution / 360 · angle)`, negated when `invert`.
    pub fn steps(&self, steps_per_revolution: f32, invert: bool) -> i32 {
        let steps = (steps_per_revolution / 360.0 * self.angle_deg) as i32;
        if invert { -steps } else { steps }
    }
}
