//! Background thread for the emission timer
//!
//! [`EmissionScheduler`] owns one thread that sleeps until the current
//! [`Debouncer`] deadline and then runs the elapse handler. Commands reach the
//! thread over a channel so that restarting never blocks the caller.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use web_time::Instant;

use super::{lock, Debouncer};
use crate::callback::Elapsed;
use crate::constants::TIMER_THREAD_NAME;
use crate::error::PickerError;

/// Message sent to the timer thread.
enum TimerMessage {
    /// Stop, then start the quiet period
    Restart,
    /// Disarm without firing
    Stop,
    /// Exit the thread
    Shutdown,
}

/// Single-shot, restart-on-activity timer.
///
/// Each [`restart`](Self::restart) pushes the deadline a full quiet period
/// into the future; when the deadline passes with no further restarts the
/// handler runs once, on the timer thread.
///
/// [`dispose`](Self::dispose) (also run on drop) detaches the handler before
/// stopping the thread, so nothing fires after it returns.
pub struct EmissionScheduler {
    /// Sender for commands to the timer thread
    command_tx: Sender<TimerMessage>,
    /// Elapse handler, shared with the timer thread
    handler: Arc<Mutex<Elapsed>>,
    /// Handle to the timer thread (for joining on dispose)
    thread_handle: Option<JoinHandle<()>>,
    quiet_period: Duration,
}

impl EmissionScheduler {
    /// Spawn the timer thread.
    ///
    /// `on_elapsed` runs on the timer thread and should read whatever state
    /// it publishes at that moment.
    pub fn spawn<F>(quiet_period: Duration, mut on_elapsed: F) -> Result<Self, PickerError>
    where
        F: FnMut() + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel::<TimerMessage>();
        let handler = Arc::new(Mutex::new(Elapsed::new(move |()| on_elapsed())));
        let thread_handler = Arc::clone(&handler);

        let thread_handle = thread::Builder::new()
            .name(TIMER_THREAD_NAME.to_string())
            .spawn(move || {
                log::debug!("Emission timer thread started");
                Self::thread_loop(Debouncer::new(quiet_period), command_rx, thread_handler);
                log::debug!("Emission timer thread exiting");
            })
            .map_err(PickerError::TimerSpawn)?;

        log::debug!("Emission timer spawned with {:?} quiet period", quiet_period);

        Ok(Self {
            command_tx,
            handler,
            thread_handle: Some(thread_handle),
            quiet_period,
        })
    }

    /// Timer thread main loop.
    fn thread_loop(
        mut debouncer: Debouncer,
        command_rx: Receiver<TimerMessage>,
        handler: Arc<Mutex<Elapsed>>,
    ) {
        loop {
            let message = match debouncer.remaining_at(Instant::now()) {
                Some(wait) => command_rx.recv_timeout(wait),
                None => command_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };

            match message {
                Ok(TimerMessage::Restart) => debouncer.restart_at(Instant::now()),
                Ok(TimerMessage::Stop) => debouncer.stop(),
                Ok(TimerMessage::Shutdown) => {
                    log::trace!("Emission timer received shutdown");
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("Emission timer channel closed");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Early wakeups fall through and wait again
                    if debouncer.take_elapsed_at(Instant::now()) {
                        let coalesced = debouncer.coalesced();
                        if lock(&handler).emit() {
                            log::trace!("Emission timer fired ({} coalesced)", coalesced);
                        } else {
                            log::trace!("Emission timer fired with no handler attached");
                        }
                    }
                }
            }
        }
    }

    /// Stop, then start the quiet period.
    pub fn restart(&self) {
        self.send(TimerMessage::Restart);
    }

    /// Disarm a pending elapse without firing.
    pub fn stop(&self) {
        self.send(TimerMessage::Stop);
    }

    /// Quiet period of this timer.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.thread_handle.is_none()
    }

    /// Detach the handler and shut the timer thread down.
    ///
    /// Safe to call more than once. Must not be called from inside the
    /// handler.
    pub fn dispose(&mut self) {
        let Some(handle) = self.thread_handle.take() else {
            return;
        };
        log::debug!("Disposing emission timer");

        // Waits for an in-flight publish to finish
        *lock(&self.handler) = Elapsed::none();

        let _ = self.command_tx.send(TimerMessage::Shutdown);
        if let Err(e) = handle.join() {
            log::warn!("Emission timer thread panicked: {:?}", e);
        }
    }

    fn send(&self, message: TimerMessage) {
        if self.is_disposed() {
            log::trace!("Emission timer already disposed, command ignored");
            return;
        }
        if self.command_tx.send(message).is_err() {
            log::warn!("Failed to reach emission timer: channel closed");
        }
    }
}

impl Drop for EmissionScheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for EmissionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmissionScheduler")
            .field("quiet_period", &self.quiet_period)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
