//! Aspect ratio and the view-local size.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Dimension, HeightAxis, ImageAttributes, WidthAxis};
use crate::error::ImageNodeError;

/// Rejected aspect ratio value.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Aspect ratio must be finite and positive, got {0}")]
pub struct InvalidAspectRatio(pub f64);

/// Width divided by height, guaranteed finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Create an aspect ratio if the value is finite and positive.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    /// Ratio of a decoded image's natural dimensions.
    ///
    /// Zero-sized images are rejected instead of producing an infinite or
    /// NaN ratio.
    pub fn from_natural(width: u32, height: u32) -> Result<Self, ImageNodeError> {
        Self::new(f64::from(width) / f64::from(height))
            .ok_or(ImageNodeError::DegenerateImage { width, height })
    }

    /// Get the inner value.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Height that keeps this ratio for the given width.
    #[inline]
    pub fn height_for(self, width: f64) -> f64 {
        width / self.0
    }

    /// Ratio used for layout: a missing ratio lays out as square.
    pub fn or_square(ratio: Option<Self>) -> f64 {
        ratio.map_or(1.0, Self::get)
    }
}

impl TryFrom<f64> for AspectRatio {
    type Error = InvalidAspectRatio;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidAspectRatio(value))
    }
}

impl From<AspectRatio> for f64 {
    fn from(ratio: AspectRatio) -> Self {
        ratio.0
    }
}

/// Size owned by the view: what is rendered right now.
///
/// Width and height are always normalized (never a legacy number).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: Dimension<WidthAxis>,
    pub height: Dimension<HeightAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
}

impl Size {
    /// Derive the view size from persisted attributes.
    pub fn from_attributes(attributes: &ImageAttributes) -> Self {
        Self {
            width: attributes.width.normalize(),
            height: attributes.height.normalize(),
            aspect_ratio: attributes.aspect_ratio,
        }
    }

    /// A concrete pixel size.
    pub fn pixels(width: f64, height: f64, aspect_ratio: Option<AspectRatio>) -> Self {
        Self {
            width: Dimension::pixels(width),
            height: Dimension::pixels(height),
            aspect_ratio,
        }
    }

    /// Check if a concrete width was ever set
    pub fn is_sized(&self) -> bool {
        !self.width.is_default()
    }

    /// Aspect ratio for layout, square when unknown.
    pub fn layout_aspect_ratio(&self) -> f64 {
        AspectRatio::or_square(self.aspect_ratio)
    }
}
