//! Committing typed latitude/longitude values.
//!
//! The GUI parses the text; this side normalises the number and tells the
//! GUI what to show instead when the value had to change.

use holoscope_coords::{GeoPoint, clamp_latitude_deg, wrap_longitude_deg};

/// Result of a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitEcho {
    /// The value actually stored.
    pub value: f32,
    /// Replacement text for the field, when the value was normalised.
    pub echo: Option<String>,
}

/// The observer position as edited through the text fields.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewerEntry {
    point: GeoPoint,
}

impl ViewerEntry {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            point: point.wrapped(),
        }
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    /// Store a latitude, clamped to `[-90, 90]`. Non-finite input is
    /// rejected and leaves the stored value alone.
    pub fn commit_latitude(&mut self, value: f32) -> Option<CommitEcho> {
        let stored = normalise(value, clamp_latitude_deg)?;
        self.point.latitude = stored.value;
        Some(stored)
    }

    /// Store a longitude, wrapped into `[-180, 180)`. `200` is stored as
    /// `-160` and echoed as `"-160"`.
    pub fn commit_longitude(&mut self, value: f32) -> Option<CommitEcho> {
        let stored = normalise(value, wrap_longitude_deg)?;
        self.point.longitude = stored.value;
        Some(stored)
    }
}

fn normalise(value: f32, f: impl Fn(f32) -> f32) -> Option<CommitEcho> {
    if !value.is_finite() {
        return None;
    }
    let normalised = f(value);
    let echo = (normalised != value).then(|| format!("{normalised}"));
    Some(CommitEcho {
        value: normalised,
        echo,
    })
}
