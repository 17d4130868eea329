//! Component-level tests for the image node view.
//!
//! Each test mounts a view inside a small element tree over a
//! [`MemoryStore`] and drives it with the same events a host would send.

mod visibility_tests;

use std::cell::RefCell;
use std::rc::Rc;

use imgnode_ui::{ElementId, ElementTree, Event, EventHub, MouseButton, Point, Rectangle};

use crate::config::ResizeConfig;
use crate::model::{AspectRatio, AttributePatch, Dimension, ImageAttributes};
use crate::store::MemoryStore;
use crate::view::{ImageNodeView, NaturalSize, NodeContext};

pub(super) const REMOTE_SRC: &str = "https://cdn.example.com/uploads/photo.png";
pub(super) const NODE_POSITION: usize = 12;

/// Host surface, document and listener hub for one node.
pub(super) struct Fixture {
    pub store: Rc<RefCell<MemoryStore>>,
    pub hub: EventHub,
    pub tree: Rc<RefCell<ElementTree>>,
    pub surface: Option<ElementId>,
    pub node: ElementId,
}

impl Fixture {
    /// Editor surface 1000px wide; the node's element starts at x = 50.
    pub fn new(attributes: ImageAttributes) -> Self {
        let mut tree = ElementTree::new();
        let page = tree.insert_root(&["page"], Rectangle::new(0.0, 0.0, 1200.0, 900.0));
        let surface = tree
            .insert_child(page, &["editor-surface"], Rectangle::new(0.0, 0.0, 1000.0, 900.0))
            .unwrap();
        let node = tree
            .insert_child(surface, &["image-node"], Rectangle::new(50.0, 20.0, 350.0, 175.0))
            .unwrap();
        Self::from_parts(attributes, tree, Some(surface), node)
    }

    /// Node mounted outside of any editor surface.
    pub fn detached_from_surface(attributes: ImageAttributes) -> Self {
        let mut tree = ElementTree::new();
        let page = tree.insert_root(&["page"], Rectangle::new(0.0, 0.0, 1200.0, 900.0));
        let node = tree
            .insert_child(page, &["image-node"], Rectangle::new(50.0, 20.0, 350.0, 175.0))
            .unwrap();
        Self::from_parts(attributes, tree, None, node)
    }

    fn from_parts(
        attributes: ImageAttributes,
        tree: ElementTree,
        surface: Option<ElementId>,
        node: ElementId,
    ) -> Self {
        Self {
            store: Rc::new(RefCell::new(MemoryStore::new(attributes))),
            hub: EventHub::new(),
            tree: Rc::new(RefCell::new(tree)),
            surface,
            node,
        }
    }

    pub fn mount(&self) -> ImageNodeView<MemoryStore> {
        self.mount_with(ResizeConfig::default())
    }

    pub fn mount_with(&self, config: ResizeConfig) -> ImageNodeView<MemoryStore> {
        ImageNodeView::mount(
            NodeContext {
                store: Rc::clone(&self.store),
                hub: self.hub.clone(),
                tree: Rc::clone(&self.tree),
                element: self.node,
                position: NODE_POSITION,
            },
            config,
        )
    }

    /// Mount and complete the first load of a 400x200 image.
    pub fn mount_loaded(&self) -> ImageNodeView<MemoryStore> {
        let view = self.mount();
        view.on_image_load(NaturalSize::new(400, 200));
        self.store.borrow_mut().clear_commits();
        view
    }

    pub fn commits(&self) -> Vec<AttributePatch> {
        self.store.borrow().commits().to_vec()
    }

    pub fn persisted(&self) -> ImageAttributes {
        use crate::store::DocumentStore;
        self.store.borrow().attributes()
    }

    pub fn dispatch(&self, event: Event) -> usize {
        self.hub.dispatch(&event)
    }
}

/// Freshly inserted, uploaded image.
pub(super) fn uploaded() -> ImageAttributes {
    ImageAttributes::new(Some(REMOTE_SRC.to_string())).with_id("img-1")
}

/// Uploaded image already sized 350x175 with ratio 2.
pub(super) fn sized() -> ImageAttributes {
    ImageAttributes {
        width: Dimension::pixels(350.0),
        height: Dimension::pixels(175.0),
        aspect_ratio: AspectRatio::new(2.0),
        ..uploaded()
    }
}

pub(super) fn press(x: f32) -> Event {
    Event::PointerDown {
        button: MouseButton::Left,
        position: Point::new(x, 100.0),
    }
}

pub(super) fn move_to(x: f32) -> Event {
    Event::PointerMove {
        position: Point::new(x, 100.0),
    }
}

pub(super) fn release(x: f32) -> Event {
    Event::PointerUp {
        button: MouseButton::Left,
        position: Point::new(x, 100.0),
    }
}
