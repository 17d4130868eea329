//! Document store seam.
//!
//! The view never owns the document. It reads attributes, requests partial
//! writes and node selection through [`DocumentStore`]; every write may fail.

use thiserror::Error;

use crate::model::{AttributePatch, ImageAttributes};

/// Errors reported by a document store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The store refused the operation
    #[error("Operation rejected: {reason}")]
    Rejected {
        /// Reason given by the store
        reason: String,
    },

    /// The node is no longer part of the document
    #[error("Node is no longer attached to the document")]
    Detached,
}

impl StoreError {
    /// Create a rejection error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Access to the document that owns an image node.
pub trait DocumentStore {
    /// Current persisted attributes of the node.
    fn attributes(&self) -> ImageAttributes;

    /// Write a partial set of attributes.
    fn set_attributes(&mut self, patch: &AttributePatch) -> Result<(), StoreError>;

    /// Select the node at a document position.
    fn set_selection(&mut self, position: usize) -> Result<(), StoreError>;

    /// Whether the document accepts user edits.
    fn is_editable(&self) -> bool;
}

/// In-memory document holding a single image node.
///
/// Records every accepted write and supports failure injection.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    attributes: ImageAttributes,
    editable: bool,
    detached: bool,
    selection: Option<usize>,
    commits: Vec<AttributePatch>,
    fail_next: bool,
    fail_all: bool,
}

impl MemoryStore {
    pub fn new(attributes: ImageAttributes) -> Self {
        Self {
            attributes,
            editable: true,
            detached: false,
            selection: None,
            commits: Vec::new(),
            fail_next: false,
            fail_all: false,
        }
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Accepted writes made through [`DocumentStore::set_attributes`].
    pub fn commits(&self) -> &[AttributePatch] {
        &self.commits
    }

    pub fn clear_commits(&mut self) {
        self.commits.clear();
    }

    /// Currently selected position
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Reject the next attribute write.
    pub fn fail_next_commit(&mut self) {
        self.fail_next = true;
    }

    /// Reject every attribute write until turned off.
    pub fn set_fail_commits(&mut self, fail: bool) {
        self.fail_all = fail;
    }

    /// Remove the node from the document. All later operations fail.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    /// Apply a change coming from elsewhere (a collaborator, undo/redo).
    /// Not recorded as a commit.
    pub fn apply_remote(&mut self, patch: &AttributePatch) {
        self.attributes.apply(patch);
    }

    /// Replace the remote source, as the upload pipeline does once finished.
    pub fn set_src(&mut self, src: Option<String>) {
        self.attributes.src = src;
    }
}

impl DocumentStore for MemoryStore {
    fn attributes(&self) -> ImageAttributes {
        self.attributes.clone()
    }

    fn set_attributes(&mut self, patch: &AttributePatch) -> Result<(), StoreError> {
        if self.detached {
            return Err(StoreError::Detached);
        }
        if self.fail_all || std::mem::take(&mut self.fail_next) {
            return Err(StoreError::rejected("write refused by document"));
        }
        self.attributes.apply(patch);
        self.commits.push(patch.clone());
        Ok(())
    }

    fn set_selection(&mut self, position: usize) -> Result<(), StoreError> {
        if self.detached {
            return Err(StoreError::Detached);
        }
        self.selection = Some(position);
        Ok(())
    }

    fn is_editable(&self) -> bool {
        self.editable
    }
}
