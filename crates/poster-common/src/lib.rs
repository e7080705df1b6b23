//! Common types shared by the map-poster crates.

pub mod color;
pub mod error;
pub mod feature;
pub mod paper;
pub mod shape;

pub use color::HexColor;
pub use error::{ErrorKind, PosterError, PosterResult};
pub use feature::FeatureClass;
pub use paper::{PaperFormat, PhysicalSize, CM_PER_INCH};
pub use shape::ClipShape;
