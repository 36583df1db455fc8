//! Frame-coherent mouse state.
//!
//! Besides position and delta, every button remembers how long it has been
//! held. The interface uses that to tell a click from a drag on release.

use glam::Vec2;
use winit::event::{ElementState, MouseButton};

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
    held_for: f32,
    released_after: f32,
}

fn button_index(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Mouse position, motion and button timing for one frame.
///
/// 1. Forward window events through the `on_*` methods.
/// 2. Call [`advance`](Self::advance) with the frame time.
/// 3. Read during the update.
/// 4. Call [`clear_transients`](Self::clear_transients) at end of frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    buttons: [ButtonFrame; 3],
    captured: bool,
}

impl MouseState {
    /// Mouse at the origin, nothing held, cursor free.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Cursor moved to `(x, y)` in window pixels. Free-cursor motion
    /// contributes to the delta; captured motion comes from raw events.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if !self.captured {
            self.delta += new_pos - self.position;
        }
        self.position = new_pos;
    }

    /// Raw device motion, used while the cursor is captured.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Button press or release.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(idx) = button_index(button) else {
            return;
        };
        let b = &mut self.buttons[idx];
        match state {
            ElementState::Pressed => {
                if !b.pressed {
                    b.pressed = true;
                    b.just_pressed = true;
                    b.held_for = 0.0;
                }
            }
            ElementState::Released => {
                if b.pressed {
                    b.pressed = false;
                    b.just_released = true;
                    b.released_after = b.held_for;
                    b.held_for = 0.0;
                }
            }
        }
    }

    /// Add `dt` seconds to the hold time of every held button.
    pub fn advance(&mut self, dt: f32) {
        for b in self.buttons.iter_mut().filter(|b| b.pressed) {
            b.held_for += dt;
        }
    }

    /// Record whether the cursor is captured. Capture itself is done by the
    /// window layer.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Clear delta and press/release edges.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Cursor position in window pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Motion accumulated this frame.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether the button is held.
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        button_index(button).is_some_and(|i| self.buttons[i].pressed)
    }

    /// Whether the button went down this frame.
    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        button_index(button).is_some_and(|i| self.buttons[i].just_pressed)
    }

    /// Whether the button went up this frame.
    #[must_use]
    pub fn just_button_released(&self, button: MouseButton) -> bool {
        button_index(button).is_some_and(|i| self.buttons[i].just_released)
    }

    /// Seconds the button has been held so far (0 when up).
    #[must_use]
    pub fn held_duration(&self, button: MouseButton) -> f32 {
        button_index(button).map_or(0.0, |i| self.buttons[i].held_for)
    }

    /// Length of the most recent completed press, in seconds.
    #[must_use]
    pub fn release_duration(&self, button: MouseButton) -> f32 {
        button_index(button).map_or(0.0, |i| self.buttons[i].released_after)
    }

    /// Whether the cursor is captured.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }
}
