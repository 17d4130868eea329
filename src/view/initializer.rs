//! First-load sizing.
//!
//! When the image finishes decoding, a never-sized node gets a concrete pixel
//! size derived from the editor surface width; a node sized by an older
//! document version only gets its missing aspect ratio filled in.

use crate::config::ResizeConfig;
use crate::model::{AspectRatio, AttributePatch, ImageAttributes, Size};

/// Natural dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// What a load-completion pass did.
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    /// First-time sizing computed (and offered to the store)
    Sized(Size),
    /// Missing ratio added to an already sized node
    Backfilled(AspectRatio),
    /// Already sized with a known ratio, nothing written
    Unchanged,
    /// Natural dimensions unusable, nothing written
    Rejected,
    /// Editor surface not found, initialization left incomplete
    ContainerMissing,
}

impl InitOutcome {
    /// Whether this pass flips the initialization latch.
    pub fn completes_initialization(&self) -> bool {
        !matches!(self, InitOutcome::ContainerMissing)
    }
}

/// Decision taken from the persisted attributes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SizingPlan {
    Initial(Size),
    Backfill(AspectRatio),
    Keep,
}

impl SizingPlan {
    /// Attributes to persist for this plan.
    pub(crate) fn patch(&self) -> Option<AttributePatch> {
        match self {
            SizingPlan::Initial(size) => Some(AttributePatch::full(size)),
            SizingPlan::Backfill(ratio) => Some(AttributePatch::aspect_ratio(*ratio)),
            SizingPlan::Keep => None,
        }
    }
}

/// Size for an image shown for the first time inside a surface `container_width` wide.
pub fn initial_size(container_width: f64, ratio: AspectRatio, config: &ResizeConfig) -> Size {
    let width = (container_width * config.initial_width_fraction)
        .max(config.min_size)
        .round();
    let height = ratio.height_for(width).round();
    Size::pixels(width, height, Some(ratio))
}

pub(crate) fn plan(
    persisted: &ImageAttributes,
    ratio: AspectRatio,
    container_width: f64,
    config: &ResizeConfig,
) -> SizingPlan {
    if persisted.width.is_default() {
        SizingPlan::Initial(initial_size(container_width, ratio, config))
    } else if persisted.aspect_ratio.is_none() {
        SizingPlan::Backfill(ratio)
    } else {
        SizingPlan::Keep
    }
}
