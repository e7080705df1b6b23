//! Poster outline shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outline a poster is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipShape {
    Circle,
    #[default]
    Square,
}

impl ClipShape {
    pub fn from_circle_flag(circle: bool) -> Self {
        if circle {
            ClipShape::Circle
        } else {
            ClipShape::Square
        }
    }

    pub fn is_circle(self) -> bool {
        matches!(self, ClipShape::Circle)
    }

    /// The other shape.
    pub fn inverted(self) -> Self {
        match self {
            ClipShape::Circle => ClipShape::Square,
            ClipShape::Square => ClipShape::Circle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClipShape::Circle => "circle",
            ClipShape::Square => "square",
        }
    }
}

impl fmt::Display for ClipShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
