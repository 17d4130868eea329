//! Persisted width/height values.
//!
//! A dimension is stored in one of three shapes: the axis sentinel ("never
//! explicitly sized"), a pixel-length string, or a bare number written by
//! older documents. Everything entering the view passes through
//! [`Dimension::normalize`], so the renderer never sees a bare number.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Marker trait for the axis a dimension belongs to.
pub trait Axis: fmt::Debug + Clone + Copy + PartialEq + Default + 'static {
    /// Sentinel stored while the axis was never explicitly sized
    const DEFAULT: &'static str;
    /// Attribute name, for diagnostics
    const NAME: &'static str;
}

/// Marker type: horizontal axis (sentinel "35%").
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WidthAxis;

/// Marker type: vertical axis (sentinel "auto").
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeightAxis;

impl Axis for WidthAxis {
    const DEFAULT: &'static str = DEFAULT_WIDTH;
    const NAME: &'static str = "width";
}

impl Axis for HeightAxis {
    const DEFAULT: &'static str = DEFAULT_HEIGHT;
    const NAME: &'static str = "height";
}

/// The three shapes a persisted dimension can take.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValue {
    /// Axis sentinel
    Default,
    /// Pixel-length string such as "350px"
    Pixels(String),
    /// Bare number from documents written before pixel strings were used
    LegacyNumber(f64),
}

/// A width or height value tagged with its axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension<A: Axis> {
    value: DimensionValue,
    axis: PhantomData<A>,
}

impl<A: Axis> Dimension<A> {
    fn from_value(value: DimensionValue) -> Self {
        Self {
            value,
            axis: PhantomData,
        }
    }

    /// The axis sentinel.
    pub fn sentinel() -> Self {
        Self::from_value(DimensionValue::Default)
    }

    /// A concrete pixel length.
    pub fn pixels(value: f64) -> Self {
        Self::from_value(DimensionValue::Pixels(format_px(value)))
    }

    /// A legacy bare number.
    pub fn legacy(value: f64) -> Self {
        Self::from_value(DimensionValue::LegacyNumber(value))
    }

    /// Interpret a stored string. The axis sentinel maps to `Default`,
    /// anything else is kept verbatim.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text == A::DEFAULT {
            Self::sentinel()
        } else {
            Self::from_value(DimensionValue::Pixels(text))
        }
    }

    pub fn value(&self) -> &DimensionValue {
        &self.value
    }

    /// Check if this is the "never explicitly sized" sentinel
    pub fn is_default(&self) -> bool {
        matches!(self.value, DimensionValue::Default)
    }

    /// Canonical form: legacy numbers become pixel strings, everything else
    /// passes through unchanged.
    pub fn normalize(&self) -> Self {
        match self.value {
            DimensionValue::LegacyNumber(n) => Self::pixels(n),
            _ => self.clone(),
        }
    }

    /// CSS text for rendering.
    pub fn to_css(&self) -> Cow<'_, str> {
        match &self.value {
            DimensionValue::Default => Cow::Borrowed(A::DEFAULT),
            DimensionValue::Pixels(text) => Cow::Borrowed(text.as_str()),
            DimensionValue::LegacyNumber(n) => Cow::Owned(format_px(*n)),
        }
    }

    /// Numeric pixel value, if the dimension is concrete and parseable.
    pub fn as_pixels(&self) -> Option<f64> {
        match &self.value {
            DimensionValue::Default => None,
            DimensionValue::Pixels(text) => text.strip_suffix("px")?.trim().parse().ok(),
            DimensionValue::LegacyNumber(n) => Some(*n),
        }
    }
}

impl<A: Axis> Default for Dimension<A> {
    fn default() -> Self {
        Self::sentinel()
    }
}

impl<A: Axis> fmt::Display for Dimension<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Format a number as a pixel length using its shortest round-trip text.
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

impl<A: Axis> Serialize for Dimension<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.value {
            DimensionValue::Default => serializer.serialize_str(A::DEFAULT),
            DimensionValue::Pixels(text) => serializer.serialize_str(text),
            DimensionValue::LegacyNumber(n) => serializer.serialize_f64(*n),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Number(f64),
    Text(String),
}

impl<'de, A: Axis> Deserialize<'de> for Dimension<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawDimension>::deserialize(deserializer)? {
            None => Self::sentinel(),
            Some(RawDimension::Number(n)) => Self::legacy(n),
            Some(RawDimension::Text(text)) => Self::from_text(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Width = Dimension<WidthAxis>;
    type Height = Dimension<HeightAxis>;

    #[test]
    fn test_legacy_numbers_become_pixels() {
        for n in [0.0, 1.0, 100.0, 350.0, 172.5, 0.1 + 0.2] {
            let normalized = Width::legacy(n).normalize();
            assert_eq!(normalized.to_css(), format!("{n}px"));
            assert!(matches!(normalized.value(), DimensionValue::Pixels(_)));
        }
        assert_eq!(Width::legacy(350.0).normalize().to_css(), "350px");
        assert_eq!(Height::legacy(87.5).normalize().to_css(), "87.5px");
    }

    #[test]
    fn test_sentinel_is_preserved() {
        assert_eq!(Width::sentinel().normalize(), Width::sentinel());
        assert_eq!(Width::sentinel().to_css(), "35%");
        assert_eq!(Height::sentinel().to_css(), "auto");
        assert!(Width::from_text("35%").is_default());
        assert!(Height::from_text("auto").is_default());
        // Another axis' sentinel is just text
        assert!(!Height::from_text("35%").is_default());
    }

    #[test]
    fn test_pixel_strings_pass_through() {
        let px = Width::from_text("240px");
        assert_eq!(px.normalize(), px);
        assert_eq!(px.normalize().normalize(), px);
        assert_eq!(px.as_pixels(), Some(240.0));
        assert_eq!(Width::from_text("12em").as_pixels(), None);
    }

    #[test]
    fn test_deserialize_shapes() {
        let w: Width = serde_json::from_str("\"35%\"").unwrap();
        assert!(w.is_default());

        let w: Width = serde_json::from_str("null").unwrap();
        assert!(w.is_default());

        let w: Width = serde_json::from_str("420").unwrap();
        assert_eq!(w, Width::legacy(420.0));
        assert_eq!(w.normalize().to_css(), "420px");

        let h: Height = serde_json::from_str("\"210px\"").unwrap();
        assert_eq!(h, Height::from_text("210px"));
    }

    #[test]
    fn test_serialize_keeps_shape() {
        assert_eq!(serde_json::to_string(&Width::sentinel()).unwrap(), "\"35%\"");
        assert_eq!(serde_json::to_string(&Height::pixels(175.0)).unwrap(), "\"175px\"");
        assert_eq!(serde_json::to_string(&Width::legacy(300.0)).unwrap(), "300.0");
    }
}
