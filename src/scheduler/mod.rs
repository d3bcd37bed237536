//! Debounced emission of color changes.
//!
//! - [`Debouncer`]: pure restart-on-activity deadline tracking
//! - [`EmissionScheduler`]: background timer thread firing a handler once per
//!   quiet period
//! - [`DebouncedEmitter`]: keeps the latest notified value and publishes it
//!   when the quiet period ends

mod debounce;
mod emitter;
mod timer;

pub use debounce::Debouncer;
pub use emitter::DebouncedEmitter;
pub use timer::EmissionScheduler;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// Everything guarded in this crate is plain color state that stays valid
/// across a panic.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
