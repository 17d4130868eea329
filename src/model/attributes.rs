//! Image node attributes as persisted by the document.

use serde::{Deserialize, Deserializer, Serialize};

use super::{AspectRatio, Dimension, HeightAxis, Size, WidthAxis};

/// Attributes of an image node, owned by the document store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttributes {
    /// Remote source; absent until the upload finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default)]
    pub width: Dimension<WidthAxis>,
    #[serde(default)]
    pub height: Dimension<HeightAxis>,
    /// Absent in documents written before the ratio was tracked
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_aspect_ratio"
    )]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Invalid stored ratios are treated as missing, so the next load backfills them.
fn lenient_aspect_ratio<'de, D>(deserializer: D) -> Result<Option<AspectRatio>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let ratio = AspectRatio::new(value);
        if ratio.is_none() {
            log::warn!("Ignoring invalid stored aspect ratio {}", value);
        }
        ratio
    }))
}

impl ImageAttributes {
    /// Attributes of a freshly inserted, never sized image.
    pub fn new(src: Option<String>) -> Self {
        Self {
            src,
            ..Self::default()
        }
    }

    /// Set the node id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Apply a partial write. `None` fields are left untouched.
    pub fn apply(&mut self, patch: &AttributePatch) {
        if let Some(width) = &patch.width {
            self.width = width.clone();
        }
        if let Some(height) = &patch.height {
            self.height = height.clone();
        }
        if let Some(ratio) = patch.aspect_ratio {
            self.aspect_ratio = Some(ratio);
        }
    }
}

/// Partial attribute write sent to the document store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension<WidthAxis>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension<HeightAxis>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
}

impl AttributePatch {
    /// Width and height of a size, without its ratio.
    pub fn dimensions(size: &Size) -> Self {
        Self {
            width: Some(size.width.clone()),
            height: Some(size.height.clone()),
            aspect_ratio: None,
        }
    }

    /// Width, height and ratio of a size.
    pub fn full(size: &Size) -> Self {
        Self {
            aspect_ratio: size.aspect_ratio,
            ..Self::dimensions(size)
        }
    }

    /// Only an aspect ratio.
    pub fn aspect_ratio(ratio: AspectRatio) -> Self {
        Self {
            aspect_ratio: Some(ratio),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.aspect_ratio.is_none()
    }
}
