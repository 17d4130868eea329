//! Callback abstraction for host-supplied event handlers
//!
//! Node views report a few things back to whoever mounted them (for example
//! "the image failed to load"). Instead of spelling out
//! `Option<Box<dyn Fn(T) -> M>>` at every such seam, views store a
//! `Callback<T, M>`.
//!
//! # Examples
//!
//! ```
//! use imgnode_ui::Callback;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let failed = Rc::new(Cell::new(false));
//! let flag = failed.clone();
//! let on_failure: Callback<bool> = Callback::new(move |value| flag.set(value));
//!
//! on_failure.call(true);
//! assert!(failed.get());
//! ```

use std::fmt;

/// A callback wrapper that encapsulates an optional event handler.
///
/// # Type Parameters
///
/// - `T`: The input type for the callback
/// - `M`: The value returned by the callback, `()` for pure side effects
pub struct Callback<T, M = ()> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `Some(result)` if the callback is set, or `None` if no callback is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_callback() {
        let callback: Callback<bool> = Callback::none();
        assert!(callback.is_none());
        assert_eq!(callback.call(true), None);
    }

    #[test]
    fn test_callback_returns_value() {
        let callback = Callback::new(|value: u32| value * 2);
        assert!(callback.is_some());
        assert_eq!(callback.call(21), Some(42));
    }
}
