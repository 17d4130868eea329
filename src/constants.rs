//! Global constants for image node sizing

/// Smallest width (in pixels) an image can be sized or dragged to
pub const MIN_SIZE: f64 = 100.0;

/// Share of the editor surface width used for a freshly inserted image
pub const INITIAL_WIDTH_FRACTION: f64 = 0.35;

/// Persisted width meaning "never explicitly sized"
pub const DEFAULT_WIDTH: &str = "35%";

/// Persisted height meaning "never explicitly sized"
pub const DEFAULT_HEIGHT: &str = "auto";

/// Marker carried by the element that hosts the editable document
pub const EDITOR_SURFACE_MARKER: &str = "editor-surface";
