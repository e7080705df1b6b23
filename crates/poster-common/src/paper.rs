//! Paper formats and physical print sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PosterError;

pub const CM_PER_INCH: f64 = 2.54;

/// A physical print size in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl PhysicalSize {
    pub fn new(width_cm: f64, height_cm: f64) -> Self {
        Self { width_cm, height_cm }
    }

    /// `(width, height)` in inches.
    pub fn to_inches(self) -> (f64, f64) {
        (self.width_cm / CM_PER_INCH, self.height_cm / CM_PER_INCH)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width_cm * factor, self.height_cm * factor)
    }

    /// Swap width and height.
    pub fn transposed(self) -> Self {
        Self::new(self.height_cm, self.width_cm)
    }

    /// Grow every side by `margin_cm`.
    pub fn with_margin(self, margin_cm: f64) -> Self {
        Self::new(self.width_cm + 2.0 * margin_cm, self.height_cm + 2.0 * margin_cm)
    }

    pub fn aspect_ratio(self) -> f64 {
        self.width_cm / self.height_cm
    }
}

/// Supported print formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperFormat {
    #[serde(rename = "square")]
    Square,
    #[default]
    A3,
    A2,
    A1,
    A0,
    /// 5:4 aspect ratio
    #[serde(rename = "54")]
    Ratio5x4,
    /// 16:9 aspect ratio
    #[serde(rename = "169")]
    Ratio16x9,
}

impl PaperFormat {
    pub const ALL: [PaperFormat; 7] = [
        PaperFormat::Square,
        PaperFormat::A3,
        PaperFormat::A2,
        PaperFormat::A1,
        PaperFormat::A0,
        PaperFormat::Ratio5x4,
        PaperFormat::Ratio16x9,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaperFormat::Square => "square",
            PaperFormat::A3 => "A3",
            PaperFormat::A2 => "A2",
            PaperFormat::A1 => "A1",
            PaperFormat::A0 => "A0",
            PaperFormat::Ratio5x4 => "54",
            PaperFormat::Ratio16x9 => "169",
        }
    }

    /// Portrait dimensions of the sheet.
    pub fn dimensions(self) -> PhysicalSize {
        match self {
            PaperFormat::Square => PhysicalSize::new(50.0, 50.0),
            PaperFormat::A3 => PhysicalSize::new(29.7, 42.0),
            PaperFormat::A2 => PhysicalSize::new(42.0, 59.4),
            PaperFormat::A1 => PhysicalSize::new(59.4, 84.1),
            PaperFormat::A0 => PhysicalSize::new(84.1, 118.8),
            PaperFormat::Ratio5x4 => PhysicalSize::new(50.0, 40.0),
            PaperFormat::Ratio16x9 => PhysicalSize::new(45.72, 81.28),
        }
    }

    /// Figure size for a render: scaled, and landscape unless `vertical`.
    pub fn figure_size(self, scaling_factor: f64, vertical: bool) -> PhysicalSize {
        let size = self.dimensions().scaled(scaling_factor);
        if vertical {
            size
        } else {
            size.transposed()
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperFormat {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| PosterError::Validation(format!("unknown paper format '{}'", s)))
    }
}
