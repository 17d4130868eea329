//! imgnode - Image sizing for rich-text documents
//!
//! Manages the size of an image embedded in a document: the first size
//! derived from the editor width and the image's natural aspect ratio,
//! synchronization with persisted attributes, and aspect-preserving drag
//! resizing with a minimum width.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod store;
pub mod view;

pub use config::{ConfigError, LogLevel, ResizeConfig};
pub use error::ImageNodeError;
pub use model::{AspectRatio, AttributePatch, Dimension, ImageAttributes, Size};
pub use store::{DocumentStore, MemoryStore, StoreError};
pub use view::{ImageNodeView, InitOutcome, NaturalSize, NodeContext, ToolbarSnapshot, Visibility};
