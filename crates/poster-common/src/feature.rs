//! The closed set of feature classes a poster is drawn from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PosterError;

/// A class of map features sharing one style rule and one layer rule.
///
/// Ordering follows declaration order, which is also the order classes are
/// serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureClass {
    Background,
    Perimeter,
    Green,
    Garden,
    Water,
    Streets,
    Pedestrian,
    Building,
    Parking,
    Forest,
    Park,
    Wetland,
    Beach,
}

impl FeatureClass {
    pub const ALL: [FeatureClass; 13] = [
        FeatureClass::Background,
        FeatureClass::Perimeter,
        FeatureClass::Green,
        FeatureClass::Garden,
        FeatureClass::Water,
        FeatureClass::Streets,
        FeatureClass::Pedestrian,
        FeatureClass::Building,
        FeatureClass::Parking,
        FeatureClass::Forest,
        FeatureClass::Park,
        FeatureClass::Wetland,
        FeatureClass::Beach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureClass::Background => "background",
            FeatureClass::Perimeter => "perimeter",
            FeatureClass::Green => "green",
            FeatureClass::Garden => "garden",
            FeatureClass::Water => "water",
            FeatureClass::Streets => "streets",
            FeatureClass::Pedestrian => "pedestrian",
            FeatureClass::Building => "building",
            FeatureClass::Parking => "parking",
            FeatureClass::Forest => "forest",
            FeatureClass::Park => "park",
            FeatureClass::Wetland => "wetland",
            FeatureClass::Beach => "beach",
        }
    }
}

impl fmt::Display for FeatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureClass {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureClass::ALL
            .iter()
            .copied()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| PosterError::Validation(format!("unknown feature class '{}'", s)))
    }
}
