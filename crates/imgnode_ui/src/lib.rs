//! imgnode_ui - Framework-level primitives for embedded document nodes
//!
//! This crate provides the pieces a node view needs from its host surface:
//! pointer events, geometry, optional callbacks, a window-level listener
//! registry and a measured element tree.

mod callback;
mod event;
mod layout;
mod listeners;
mod tree;

pub use callback::Callback;
pub use event::{Event, EventKind, MouseButton, Propagation};
pub use layout::{Point, Rectangle, Size};
pub use listeners::{EventHub, ListenerHandle};
pub use tree::{ElementId, ElementTree};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::Callback;
    pub use crate::event::{Event, EventKind, MouseButton, Propagation};
    pub use crate::layout::{Point, Rectangle, Size};
    pub use crate::listeners::{EventHub, ListenerHandle};
    pub use crate::tree::{ElementId, ElementTree};
}
