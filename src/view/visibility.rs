//! Which parts of the node are shown.
//!
//! Derived on every render from the current inputs and never stored, so it
//! cannot drift from the state it describes.

use serde::Serialize;

/// Inputs the flags are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityInputs {
    /// Uploaded source present
    pub has_remote: bool,
    /// Local preview present
    pub has_local_preview: bool,
    pub initialized: bool,
    pub editable: bool,
    pub selected: bool,
}

/// Derived visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Visibility {
    pub loader: bool,
    pub toolbar: bool,
    pub resize_handle: bool,
    pub selection_highlight: bool,
}

impl Visibility {
    pub fn derive(inputs: VisibilityInputs) -> Self {
        let has_source = inputs.has_remote || inputs.has_local_preview;
        let ready = inputs.has_remote && inputs.initialized;

        Self {
            loader: !has_source || !inputs.initialized,
            toolbar: ready,
            resize_handle: inputs.editable && ready,
            // A local preview is shown only while no remote source exists
            selection_highlight: inputs.selected && inputs.has_remote,
        }
    }
}
