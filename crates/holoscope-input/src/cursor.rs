use serde::{Deserialize, Serialize};

/// Whether the pointer is locked to the window for mouse-look or free for
/// clicking on interface elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMode {
    /// Hidden and locked; mouse motion turns the camera.
    #[default]
    Captured,
    /// Visible and free; mouse motion drags and clicks.
    Free,
}

impl CursorMode {
    /// `true` for [`CursorMode::Captured`].
    #[must_use]
    pub fn is_captured(self) -> bool {
        self == Self::Captured
    }
}
