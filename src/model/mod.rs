//! Data model for image nodes: persisted attributes and the view-local size.

mod attributes;
mod dimension;
mod size;

pub use attributes::{AttributePatch, ImageAttributes};
pub use dimension::{Axis, Dimension, DimensionValue, HeightAxis, WidthAxis, format_px};
pub use size::{AspectRatio, InvalidAspectRatio, Size};
