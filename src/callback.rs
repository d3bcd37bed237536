//! Callback abstraction for publish handlers
//!
//! Publishing happens on the emission timer thread, so unlike plain UI
//! callbacks these wrappers require `Send`. Instead of writing
//! `Option<Box<dyn FnMut(T) + Send>>` at every use site, the picker and the
//! scheduler use [`Publish`] and [`Elapsed`].
//!
//! # Examples
//!
//! ```
//! use colorpick::Publish;
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let mut publish = Publish::new(move |value: String| {
//!     let _ = tx.send(value);
//! });
//!
//! assert!(publish.call("#FF0000".to_string()));
//! assert_eq!(rx.recv().unwrap(), "#FF0000");
//! ```

use std::fmt;

/// An optional handler receiving published values of type `T`.
pub struct Publish<T> {
    f: Option<Box<dyn FnMut(T) + Send>>,
}

impl<T> Publish<T> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the handler with a value, if one is set.
    ///
    /// Returns whether a handler received the value.
    pub fn call(&mut self, value: T) -> bool {
        match self.f.as_mut() {
            Some(f) => {
                f(value);
                true
            }
            None => false,
        }
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

impl<T> Default for Publish<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Publish<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publish")
            .field("set", &self.is_some())
            .finish()
    }
}

/// Handler run when the emission timer elapses.
///
/// Carries no value: the handler reads whatever state is current when it
/// runs.
pub type Elapsed = Publish<()>;

impl Elapsed {
    /// Call the handler without any parameters.
    pub fn emit(&mut self) -> bool {
        self.call(())
    }
}
