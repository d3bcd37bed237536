//! Latest-value debouncing on top of [`EmissionScheduler`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{lock, EmissionScheduler};
use crate::callback::Publish;
use crate::error::PickerError;

/// Coalesces a stream of values into one publish per quiet period.
///
/// [`notify`](Self::notify) overwrites the remembered value and restarts the
/// timer; nothing is queued. When the timer elapses the most recent value is
/// published exactly once.
///
/// This is the value-carrying variant: the caller formats the value up
/// front. [`ColorPicker`](crate::ColorPicker) drives [`EmissionScheduler`]
/// directly instead and formats its shared state when the timer fires.
#[derive(Debug)]
pub struct DebouncedEmitter<T> {
    latest: Arc<Mutex<Option<T>>>,
    scheduler: EmissionScheduler,
}

impl<T: Send + 'static> DebouncedEmitter<T> {
    /// Spawn the timer; `publish` runs on the timer thread.
    pub fn spawn<F>(quiet_period: Duration, publish: F) -> Result<Self, PickerError>
    where
        F: FnMut(T) + Send + 'static,
    {
        let latest = Arc::new(Mutex::new(None));
        let pending = Arc::clone(&latest);
        let mut publish = Publish::new(publish);

        let scheduler = EmissionScheduler::spawn(quiet_period, move || {
            // Release the slot before publishing so notify never waits on it
            let value = lock(&pending).take();
            if let Some(value) = value {
                publish.call(value);
            }
        })?;

        Ok(Self { latest, scheduler })
    }

    /// Remember `value` as the one to publish and restart the quiet period.
    pub fn notify(&self, value: T) {
        *lock(&self.latest) = Some(value);
        self.scheduler.restart();
    }

    /// Whether a value is waiting for the quiet period to end.
    pub fn has_pending(&self) -> bool {
        lock(&self.latest).is_some()
    }

    /// Stop the timer and drop any pending value. Safe to call twice.
    pub fn dispose(&mut self) {
        self.scheduler.dispose();
        lock(&self.latest).take();
    }
}
