//! Error types for image node operations.

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised inside the image node view.
///
/// None of these leave the view: they are logged at the boundary and the
/// view carries on with its local state.
#[derive(Error, Debug)]
pub enum ImageNodeError {
    /// No ancestor of the node carries the editor surface marker
    #[error("No ancestor element marked '{marker}' found for the image node")]
    ContainerNotFound {
        /// The marker that was searched for
        marker: String,
    },

    /// Natural image dimensions cannot produce a usable aspect ratio
    #[error("Degenerate image dimensions {width}x{height}")]
    DegenerateImage {
        /// Natural width in pixels
        width: u32,
        /// Natural height in pixels
        height: u32,
    },

    /// The document store refused an attribute write or selection
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),
}

impl ImageNodeError {
    /// Create a container-not-found error.
    pub fn container_not_found(marker: impl Into<String>) -> Self {
        Self::ContainerNotFound {
            marker: marker.into(),
        }
    }
}
