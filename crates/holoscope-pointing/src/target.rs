//! What the robot is pointing at.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown target: {0}")]
pub struct TargetParseError(pub String);

/// Selectable targets, in the order the arrow keys cycle through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AstralTarget {
    #[default]
    Iss,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl AstralTarget {
    pub const ALL: [AstralTarget; 9] = [
        AstralTarget::Iss,
        AstralTarget::Mercury,
        AstralTarget::Venus,
        AstralTarget::Mars,
        AstralTarget::Jupiter,
        AstralTarget::Saturn,
        AstralTarget::Uranus,
        AstralTarget::Neptune,
        AstralTarget::Pluto,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Step `delta` places through [`Self::ALL`], wrapping at both ends.
    pub fn cycle(self, delta: i32) -> Self {
        let len = Self::ALL.len() as i32;
        let i = (self.index() as i32 + delta).rem_euclid(len);
        Self::ALL[i as usize]
    }

    /// Satellites are tracked from a position feed, planets from
    /// azimuth/altitude.
    pub fn is_satellite(self) -> bool {
        matches!(self, AstralTarget::Iss)
    }

    pub fn name(self) -> &'static str {
        match self {
            AstralTarget::Iss => "ISS",
            AstralTarget::Mercury => "Mercury",
            AstralTarget::Venus => "Venus",
            AstralTarget::Mars => "Mars",
            AstralTarget::Jupiter => "Jupiter",
            AstralTarget::Saturn => "Saturn",
            AstralTarget::Uranus => "Uranus",
            AstralTarget::Neptune => "Neptune",
            AstralTarget::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for AstralTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AstralTarget {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TargetParseError(s.to_string()))
    }
}
