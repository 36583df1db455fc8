//! Frame-coherent keyboard state.
//!
//! Physical key codes are used so WASD walks the same way on every layout.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event, independent of the window backend.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an auto-repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Non-repeat press of `code`.
    pub fn press(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// Release of `code`.
    pub fn release(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Held keys plus the edges seen during the current frame.
///
/// Feed events with [`process_event`](Self::process_event) or
/// [`process_raw`](Self::process_raw), read during the update, then call
/// [`clear_transients`](Self::clear_transients) once the frame is done.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    pressed_this_frame: HashSet<PhysicalKey>,
    released_this_frame: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Empty state, nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Process a [`RawKeyEvent`]. Auto-repeat is ignored so a held key
    /// produces exactly one press edge.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.pressed_this_frame.insert(event.key);
                }
            }
            ElementState::Released => {
                if self.held.remove(&event.key) {
                    self.released_this_frame.insert(event.key);
                }
            }
        }
    }

    /// `true` while the key is down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.held.contains(&key)
    }

    /// `true` only in the frame the key went down.
    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed_this_frame.contains(&key)
    }

    /// `true` only in the frame the key went up.
    #[must_use]
    pub fn just_released(&self, key: PhysicalKey) -> bool {
        self.released_this_frame.contains(&key)
    }

    /// Forget this frame's edges. Held keys stay held.
    pub fn clear_transients(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn test_press_sets_held_and_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyE));
        assert!(kb.is_pressed(key(KeyCode::KeyE)));
        assert!(kb.just_pressed(key(KeyCode::KeyE)));
    }

    #[test]
    fn test_edge_lasts_one_frame() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyW));
        kb.clear_transients();
        assert!(kb.is_pressed(key(KeyCode::KeyW)));
        assert!(!kb.just_pressed(key(KeyCode::KeyW)));
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyE));
        kb.clear_transients();
        kb.process_raw(RawKeyEvent {
            repeat: true,
            ..RawKeyEvent::press(KeyCode::KeyE)
        });
        assert!(!kb.just_pressed(key(KeyCode::KeyE)));
    }

    #[test]
    fn test_release_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyA));
        kb.clear_transients();
        kb.process_raw(RawKeyEvent::release(KeyCode::KeyA));
        assert!(!kb.is_pressed(key(KeyCode::KeyA)));
        assert!(kb.just_released(key(KeyCode::KeyA)));
    }

    #[test]
    fn test_release_without_press_has_no_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::release(KeyCode::KeyA));
        assert!(!kb.just_released(key(KeyCode::KeyA)));
    }
}
