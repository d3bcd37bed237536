//! Error types for setting up a color picker.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while creating a picker.
///
/// Interaction itself never fails: unreadable color strings fall back to a
/// default color instead of producing an error.
#[derive(Error, Debug)]
pub enum PickerError {
    /// The emission timer thread could not be started
    #[error("Failed to spawn emission timer thread: {0}")]
    TimerSpawn(#[source] std::io::Error),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}
