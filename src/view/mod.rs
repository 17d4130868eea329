//! Image node view.
//!
//! Ties the persisted attributes, the first-load initializer, the drag
//! resizer and the derived visibility flags together for one mounted node.
//!
//! Data flows one way per event:
//! - store change → [`ImageNodeView::on_attributes_changed`] → local size
//! - image decoded → [`ImageNodeView::on_image_load`] → local size + store
//! - drag → window listeners → local size on every move, store once on release
//!
//! Failures inside the view are logged and contained; only a failed image
//! decode is reported to the host, through the load-failure callback.

mod initializer;
mod resizer;
mod size_state;
mod visibility;

#[cfg(test)]
mod tests;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use imgnode_ui::{
    Callback, ElementId, ElementTree, Event, EventHub, EventKind, ListenerHandle, MouseButton,
    Propagation,
};
use serde::Serialize;

use crate::config::ResizeConfig;
use crate::error::ImageNodeError;
use crate::model::{
    AspectRatio, AttributePatch, Dimension, HeightAxis, ImageAttributes, Size, WidthAxis,
};
use crate::store::DocumentStore;

pub use initializer::{InitOutcome, NaturalSize, initial_size};
pub use resizer::{DragResizer, FinishedResize, FrameCoalescer, WidthBounds, resize_to_pointer};
pub use size_state::{InitLatch, InitState, SizeCell};
pub use visibility::{Visibility, VisibilityInputs};

/// Everything a view needs from the host to be mounted.
pub struct NodeContext<S> {
    pub store: Rc<RefCell<S>>,
    pub hub: EventHub,
    pub tree: Rc<RefCell<ElementTree>>,
    /// The node's own element; its bounds are the drag reference frame
    pub element: ElementId,
    /// Document position used to select the node
    pub position: usize,
}

/// Read-only view of the node for the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarSnapshot {
    pub src: Option<String>,
    pub aspect_ratio: Option<AspectRatio>,
    pub width: String,
    pub height: String,
}

/// State shared between the view and its window-level listeners.
///
/// Listeners hold it weakly; dropping the view frees it and, with it, any
/// listener handles the resizer still owns.
struct Shared<S> {
    store: Rc<RefCell<S>>,
    tree: Rc<RefCell<ElementTree>>,
    element: ElementId,
    position: usize,
    config: ResizeConfig,
    size: SizeCell,
    latch: InitLatch,
    resizer: RefCell<DragResizer>,
    container: Cell<Option<ElementId>>,
    /// Persisted width/height last mirrored into `size` or written by this view
    synced: RefCell<(Dimension<WidthAxis>, Dimension<HeightAxis>)>,
    local_preview: RefCell<Option<String>>,
    on_load_failure: RefCell<Callback<bool>>,
}

/// One mounted image node.
pub struct ImageNodeView<S: DocumentStore + 'static> {
    shared: Rc<Shared<S>>,
    hub: EventHub,
}

impl<S: DocumentStore + 'static> ImageNodeView<S> {
    /// Mount a view, deriving its size from the persisted attributes.
    pub fn mount(context: NodeContext<S>, config: ResizeConfig) -> Self {
        let attributes = context.store.borrow().attributes();
        let size = Size::from_attributes(&attributes);
        log::debug!(
            "Mounting image node {:?} at {} ({} x {})",
            attributes.id,
            context.position,
            size.width,
            size.height
        );

        let shared = Rc::new(Shared {
            store: context.store,
            tree: context.tree,
            element: context.element,
            position: context.position,
            config,
            size: SizeCell::new(size),
            latch: InitLatch::default(),
            resizer: RefCell::new(DragResizer::new()),
            container: Cell::new(None),
            synced: RefCell::new((attributes.width, attributes.height)),
            local_preview: RefCell::new(None),
            on_load_failure: RefCell::new(Callback::none()),
        });

        Self {
            shared,
            hub: context.hub,
        }
    }

    /// Use a known editor surface instead of searching for one on load.
    pub fn with_container(self, container: ElementId) -> Self {
        self.shared.container.set(Some(container));
        self
    }

    /// Set the callback told when the image fails to load.
    pub fn on_load_failure<F>(self, f: F) -> Self
    where
        F: Fn(bool) + 'static,
    {
        *self.shared.on_load_failure.borrow_mut() = Callback::new(f);
        self
    }

    /// Set or clear the local preview shown before the upload finishes.
    pub fn set_local_preview(&self, preview: Option<String>) {
        *self.shared.local_preview.borrow_mut() = preview;
    }

    /// Image finished decoding.
    pub fn on_image_load(&self, natural: NaturalSize) -> InitOutcome {
        let outcome = match self.shared.initialize(natural) {
            Ok(outcome) => outcome,
            Err(e @ ImageNodeError::ContainerNotFound { .. }) => {
                log::error!("Image node initialization aborted: {}", e);
                InitOutcome::ContainerMissing
            }
            Err(e) => {
                log::warn!("Image node sizing skipped: {}", e);
                InitOutcome::Rejected
            }
        };

        if outcome.completes_initialization() && self.shared.latch.mark() {
            log::debug!("Image node initialized ({:?})", outcome);
        }
        outcome
    }

    /// Image failed to decode or fetch.
    pub fn on_image_error(&self) {
        log::warn!("Image failed to load for node at {}", self.shared.position);
        self.shared.on_load_failure.borrow().call(true);
    }

    /// Persisted attributes changed. Mirrors externally changed width/height
    /// into the local size; never writes back.
    pub fn on_attributes_changed(&self) {
        let attributes = self.shared.store.borrow().attributes();
        let changed = {
            let mut synced = self.shared.synced.borrow_mut();
            let changed = synced.0 != attributes.width || synced.1 != attributes.height;
            if changed {
                *synced = (attributes.width.clone(), attributes.height.clone());
            }
            changed
        };
        if !changed {
            return;
        }

        let next = self.shared.size.update(|prev| Size {
            width: attributes.width.normalize(),
            height: attributes.height.normalize(),
            ..prev.clone()
        });
        log::debug!("Synced external size {} x {}", next.width, next.height);
    }

    /// Pointer pressed on the resize handle.
    pub fn on_handle_pointer_down(&self, event: &Event) -> Propagation {
        if !matches!(
            event,
            Event::PointerDown {
                button: MouseButton::Left,
                ..
            }
        ) {
            return Propagation::Continue;
        }
        if !self.visibility(false).resize_handle {
            log::debug!("Resize handle pressed while hidden, ignoring");
            return Propagation::Continue;
        }

        let Some(frame) = self.shared.tree.borrow().bounding_rect(self.shared.element) else {
            log::warn!("Image node element has no bounds, cannot resize");
            return Propagation::Stop;
        };

        let listeners = self.attach_drag_listeners();
        self.shared.resizer.borrow_mut().begin(
            frame,
            self.shared.config.move_frame_interval(),
            listeners,
        );
        Propagation::Stop
    }

    fn attach_drag_listeners(&self) -> Vec<ListenerHandle> {
        let mut handles = Vec::with_capacity(5);

        for kind in [EventKind::PointerMove, EventKind::TouchMove] {
            let weak = Rc::downgrade(&self.shared);
            handles.push(self.hub.listen(kind, move |event| {
                if let Some(shared) = weak.upgrade() {
                    shared.handle_drag_move(event);
                }
            }));
        }

        for kind in [
            EventKind::PointerUp,
            EventKind::TouchEnd,
            EventKind::PointerLeave,
        ] {
            let weak = Rc::downgrade(&self.shared);
            handles.push(self.hub.listen(kind, move |_| {
                if let Some(shared) = weak.upgrade() {
                    shared.handle_drag_end();
                }
            }));
        }

        handles
    }

    /// Node clicked: select it in the document.
    pub fn on_click(&self) {
        let result = self
            .shared
            .store
            .borrow_mut()
            .set_selection(self.shared.position);
        if let Err(e) = result {
            log::error!("Failed to select image node: {}", e);
        }
    }

    /// Source to display: the uploaded one, else the local preview.
    pub fn displayed_source(&self) -> Option<String> {
        self.shared
            .store
            .borrow()
            .attributes()
            .src
            .or_else(|| self.shared.local_preview.borrow().clone())
    }

    /// Flags for the current render.
    pub fn visibility(&self, selected: bool) -> Visibility {
        let (has_remote, editable) = {
            let store = self.shared.store.borrow();
            (store.attributes().src.is_some(), store.is_editable())
        };
        Visibility::derive(VisibilityInputs {
            has_remote,
            has_local_preview: self.shared.local_preview.borrow().is_some(),
            initialized: self.shared.latch.is_initialized(),
            editable,
            selected,
        })
    }

    pub fn toolbar_snapshot(&self) -> ToolbarSnapshot {
        let size = self.size();
        ToolbarSnapshot {
            src: self.displayed_source(),
            aspect_ratio: size.aspect_ratio,
            width: size.width.to_css().into_owned(),
            height: size.height.to_css().into_owned(),
        }
    }

    /// Size currently rendered.
    pub fn size(&self) -> Size {
        self.shared.size.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.latch.is_initialized()
    }

    pub fn is_resizing(&self) -> bool {
        self.shared.resizer.borrow().is_resizing()
    }
}

impl<S: DocumentStore + 'static> Drop for ImageNodeView<S> {
    fn drop(&mut self) {
        self.shared.resizer.borrow_mut().cancel();
        log::trace!("Unmounted image node at {}", self.shared.position);
    }
}

impl<S: DocumentStore> Shared<S> {
    fn resolve_container(&self) -> Result<ElementId, ImageNodeError> {
        if let Some(container) = self.container.get() {
            return Ok(container);
        }
        let container = self
            .tree
            .borrow()
            .closest(self.element, &self.config.container_marker)
            .ok_or_else(|| ImageNodeError::container_not_found(&self.config.container_marker))?;
        self.container.set(Some(container));
        Ok(container)
    }

    fn initialize(&self, natural: NaturalSize) -> Result<InitOutcome, ImageNodeError> {
        let container = self.resolve_container()?;
        let container_width = self
            .tree
            .borrow()
            .bounding_rect(container)
            .map(|rect| f64::from(rect.width))
            .ok_or_else(|| ImageNodeError::container_not_found(&self.config.container_marker))?;
        let ratio = AspectRatio::from_natural(natural.width, natural.height)?;

        let persisted: ImageAttributes = self.store.borrow().attributes();
        let plan = initializer::plan(&persisted, ratio, container_width, &self.config);
        let patch = plan.patch();

        let outcome = match plan {
            initializer::SizingPlan::Initial(size) => {
                self.size.update(|_| size.clone());
                log::debug!("Initial size {} x {}", size.width, size.height);
                InitOutcome::Sized(size)
            }
            initializer::SizingPlan::Backfill(ratio) => {
                self.size.update(|prev| Size {
                    aspect_ratio: Some(ratio),
                    ..prev.clone()
                });
                log::debug!("Backfilled aspect ratio {}", ratio.get());
                InitOutcome::Backfilled(ratio)
            }
            initializer::SizingPlan::Keep => InitOutcome::Unchanged,
        };

        if let Some(patch) = patch {
            self.commit(&patch, "initial attributes");
        }
        Ok(outcome)
    }

    fn handle_drag_move(&self, event: &Event) {
        let Some(position) = event.position() else {
            return;
        };
        let offered = self.resizer.borrow_mut().offer_move(position.x);
        if let Some((frame, x)) = offered {
            self.apply_pointer(frame.left(), x);
        }
    }

    fn handle_drag_end(&self) {
        let finished = self.resizer.borrow_mut().finish();
        let Some(finished) = finished else {
            return;
        };
        if let Some(x) = finished.pending_x {
            self.apply_pointer(finished.frame.left(), x);
        }
        let size = self.size.get();
        self.commit(&AttributePatch::dimensions(&size), "resized dimensions");
    }

    fn apply_pointer(&self, frame_left: f32, x: f32) {
        let bounds = WidthBounds {
            min: self.config.min_size,
            max: self.config.max_width,
        };
        self.size.update(|prev| {
            resize_to_pointer(prev, x, frame_left, bounds).unwrap_or_else(|| prev.clone())
        });
    }

    /// Write `patch`. Accepted width/height count as synced, so a later
    /// external change back to the previous values (undo) is still mirrored.
    fn try_commit(&self, patch: &AttributePatch) -> Result<(), ImageNodeError> {
        self.store.borrow_mut().set_attributes(patch)?;
        let mut synced = self.synced.borrow_mut();
        if let Some(width) = &patch.width {
            synced.0 = width.clone();
        }
        if let Some(height) = &patch.height {
            synced.1 = height.clone();
        }
        Ok(())
    }

    /// Best-effort write. Local state stays as it is on failure.
    fn commit(&self, patch: &AttributePatch, what: &str) {
        match self.try_commit(patch) {
            Ok(()) => log::debug!("Persisted {}", what),
            Err(e) => log::error!("Failed to persist {}: {}", what, e),
        }
    }
}
