//! View-local size cell and the one-shot initialization latch.

use std::cell::{Cell, RefCell};

use crate::model::Size;

/// Cell holding the size the view renders.
///
/// Writers go through [`SizeCell::update`], which computes the next value from
/// the value stored at the time of the write rather than from a copy taken
/// earlier. Load completion and external reconciliation can interleave
/// without one overwriting the other's fields.
#[derive(Debug, Default)]
pub struct SizeCell {
    inner: RefCell<Size>,
}

impl SizeCell {
    pub fn new(size: Size) -> Self {
        Self {
            inner: RefCell::new(size),
        }
    }

    /// Snapshot of the current size.
    pub fn get(&self) -> Size {
        self.inner.borrow().clone()
    }

    /// Read-modify-write. Returns the stored value.
    pub fn update<F>(&self, f: F) -> Size
    where
        F: FnOnce(&Size) -> Size,
    {
        let mut slot = self.inner.borrow_mut();
        let next = f(&slot);
        *slot = next.clone();
        next
    }
}

/// Lifecycle of the first-load sizing logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    #[default]
    Uninitialized,
    Initialized,
}

/// Latch that flips to `Initialized` once and stays there for the mount.
#[derive(Debug, Default)]
pub struct InitLatch {
    state: Cell<InitState>,
}

impl InitLatch {
    pub fn state(&self) -> InitState {
        self.state.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get() == InitState::Initialized
    }

    /// Flip the latch. Returns true only for the call that flipped it.
    pub fn mark(&self) -> bool {
        self.state.replace(InitState::Initialized) == InitState::Uninitialized
    }
}
