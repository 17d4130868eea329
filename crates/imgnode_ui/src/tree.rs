//! Measured element tree.
//!
//! A minimal model of the host surface: elements carry marker names and the
//! bounding rectangle from the last layout pass. Node views use it to find
//! their enclosing editor surface and to measure themselves.

use std::collections::BTreeSet;

use crate::Rectangle;

/// Identifier of an element in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Element {
    parent: Option<ElementId>,
    markers: BTreeSet<String>,
    bounds: Rectangle,
}

/// Arena of elements with parent links.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless element.
    pub fn insert_root(&mut self, markers: &[&str], bounds: Rectangle) -> ElementId {
        self.push(None, markers, bounds)
    }

    /// Add an element under `parent`. Returns `None` if the parent is unknown.
    pub fn insert_child(
        &mut self,
        parent: ElementId,
        markers: &[&str],
        bounds: Rectangle,
    ) -> Option<ElementId> {
        self.get(parent)?;
        Some(self.push(Some(parent), markers, bounds))
    }

    fn push(&mut self, parent: Option<ElementId>, markers: &[&str], bounds: Rectangle) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            parent,
            markers: markers.iter().map(|m| (*m).to_string()).collect(),
            bounds,
        });
        id
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Parent of an element
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id)?.parent
    }

    /// Bounding rectangle from the last layout pass.
    pub fn bounding_rect(&self, id: ElementId) -> Option<Rectangle> {
        self.get(id).map(|el| el.bounds)
    }

    /// Record a new layout result for an element. Returns false for unknown ids.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rectangle) -> bool {
        match self.elements.get_mut(id.0) {
            Some(el) => {
                el.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Nearest element carrying `marker`, starting at `id` itself and walking
    /// up through its ancestors.
    pub fn closest(&self, id: ElementId, marker: &str) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            let element = self.get(candidate)?;
            if element.markers.contains(marker) {
                return Some(candidate);
            }
            current = element.parent;
        }
        None
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
