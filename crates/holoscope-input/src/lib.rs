//! Input state for the render loop: frame-coherent keyboard and mouse
//! tracking, action bindings, and the cursor mode requested by the interface.

pub mod action_map;
pub mod cursor;
pub mod keyboard;
pub mod mouse;

pub use action_map::{
    Action, ActionResolver, ActionState, InputBinding, InputMap, MouseButtonBinding,
    string_to_keycode,
};
pub use cursor::CursorMode;
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
