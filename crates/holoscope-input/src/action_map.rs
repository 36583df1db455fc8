//! Maps semantic actions to physical keys and mouse buttons.
//!
//! [`InputMap`] is the binding table, serialisable to RON and patchable from
//! the `input.keybindings` config section. [`ActionResolver`] reads the
//! keyboard and mouse once per frame and fills an [`ActionState`].

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Serde helper for [`KeyCode`], which has no serde support of its own.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        super::string_to_keycode(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }
}

/// Parse the `Debug` name of a [`KeyCode`] (`"KeyW"`, `"Enter"`, ...).
pub fn string_to_keycode(s: &str) -> Option<KeyCode> {
    Some(match s {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}

/// What the user can ask the application to do.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Walk forward.
    MoveForward,
    /// Walk backward.
    MoveBack,
    /// Strafe left.
    MoveLeft,
    /// Strafe right.
    MoveRight,
    /// Open or close whichever interface is in range.
    ToggleInterface,
    /// Drag or click on the globe.
    Select,
    /// Step to the next tracked target.
    NextTarget,
    /// Step to the previous tracked target.
    PreviousTarget,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "MoveForward" => Self::MoveForward,
            "MoveBack" => Self::MoveBack,
            "MoveLeft" => Self::MoveLeft,
            "MoveRight" => Self::MoveRight,
            "ToggleInterface" => Self::ToggleInterface,
            "Select" => Self::Select,
            "NextTarget" => Self::NextTarget,
            "PreviousTarget" => Self::PreviousTarget,
            _ => return Err(()),
        })
    }
}

/// A physical input that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputBinding {
    /// A keyboard key (physical scan code).
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A mouse button.
    MouseButton(MouseButtonBinding),
}

/// Serde-friendly stand-in for [`winit::event::MouseButton`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MouseButtonBinding {
    Left,
    Right,
    Middle,
}

impl MouseButtonBinding {
    /// Convert to the winit [`MouseButton`] type.
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// Maps [`Action`]s to lists of [`InputBinding`]s. Any binding of an action
/// activates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMap {
    /// The binding table.
    pub bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for InputMap {
    fn default() -> Self {
        let mut bindings: HashMap<Action, Vec<InputBinding>> = HashMap::new();
        bindings.insert(Action::MoveForward, vec![InputBinding::Key(KeyCode::KeyW)]);
        bindings.insert(Action::MoveBack, vec![InputBinding::Key(KeyCode::KeyS)]);
        bindings.insert(Action::MoveLeft, vec![InputBinding::Key(KeyCode::KeyA)]);
        bindings.insert(Action::MoveRight, vec![InputBinding::Key(KeyCode::KeyD)]);
        bindings.insert(
            Action::ToggleInterface,
            vec![InputBinding::Key(KeyCode::KeyE)],
        );
        bindings.insert(
            Action::Select,
            vec![InputBinding::MouseButton(MouseButtonBinding::Left)],
        );
        bindings.insert(Action::NextTarget, vec![InputBinding::Key(KeyCode::ArrowRight)]);
        bindings.insert(
            Action::PreviousTarget,
            vec![InputBinding::Key(KeyCode::ArrowLeft)],
        );
        Self { bindings }
    }
}

impl InputMap {
    /// Empty map, nothing bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Default bindings with `overrides` (action name → key name) applied.
    /// Unknown action or key names are logged and skipped.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut map = Self::default();
        for (action_name, key_name) in overrides {
            let Ok(action) = action_name.parse::<Action>() else {
                tracing::warn!(action = %action_name, "unknown action in keybindings");
                continue;
            };
            let Some(code) = string_to_keycode(key_name) else {
                tracing::warn!(action = %action_name, key = %key_name, "unknown key in keybindings");
                continue;
            };
            map.set_bindings(action, vec![InputBinding::Key(code)]);
        }
        map
    }

    /// Replace the bindings for an action.
    pub fn set_bindings(&mut self, action: Action, bindings: Vec<InputBinding>) {
        self.bindings.insert(action, bindings);
    }

    /// Bindings for an action (empty when unbound).
    #[must_use]
    pub fn get_bindings(&self, action: &Action) -> &[InputBinding] {
        self.bindings.get(action).map_or(&[], |v| v.as_slice())
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Per-frame action values plus the previous frame's, for edge detection.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    active: HashMap<Action, bool>,
    prev_active: HashMap<Action, bool>,
}

impl ActionState {
    /// Nothing active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any binding of the action is held.
    #[must_use]
    pub fn is_action_active(&self, action: Action) -> bool {
        self.active.get(&action).copied().unwrap_or(false)
    }

    /// True only on the frame the action became active.
    #[must_use]
    pub fn action_just_activated(&self, action: Action) -> bool {
        let prev = self.prev_active.get(&action).copied().unwrap_or(false);
        self.is_action_active(action) && !prev
    }

    /// True only on the frame the action stopped being active.
    #[must_use]
    pub fn action_just_deactivated(&self, action: Action) -> bool {
        let prev = self.prev_active.get(&action).copied().unwrap_or(false);
        !self.is_action_active(action) && prev
    }

    /// Movement axes from the four move actions: `(strafe, forward)`, each
    /// in `{-1, 0, 1}`.
    #[must_use]
    pub fn move_axes(&self) -> (f32, f32) {
        let axis = |pos: Action, neg: Action| {
            f32::from(u8::from(self.is_action_active(pos)))
                - f32::from(u8::from(self.is_action_active(neg)))
        };
        (
            axis(Action::MoveRight, Action::MoveLeft),
            axis(Action::MoveForward, Action::MoveBack),
        )
    }
}

/// Reads keyboard and mouse state into an [`ActionState`].
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve every bound action. Call once per frame after the input
    /// states have seen this frame's events.
    pub fn resolve(
        input_map: &InputMap,
        keyboard: &KeyboardState,
        mouse: &MouseState,
        state: &mut ActionState,
    ) {
        state.prev_active.clone_from(&state.active);
        state.active.clear();

        for (action, bindings) in &input_map.bindings {
            let active = bindings.iter().any(|binding| match binding {
                InputBinding::Key(code) => keyboard.is_pressed(PhysicalKey::Code(*code)),
                InputBinding::MouseButton(btn) => mouse.is_button_pressed(btn.to_winit()),
            });
            state.active.insert(*action, active);
        }
    }
}
