//! colorpick - color model engine for an interactive color picker
//!
//! Converts pointer and slider input into a single HSV color, renders it as
//! hex or `rgba()` text, and publishes it through a debounced callback.
//! Value types, conversions and string parsing live in `colorpick_model` and
//! are re-exported here.

mod callback;
pub mod config;
pub mod constants;
mod error;
mod interaction;
mod picker;
pub mod scheduler;

pub use callback::{Elapsed, Publish};
pub use colorpick_model::{
    hsv_to_rgb, parse, parse_rgb, rgb_to_hsv, try_parse, ColorFormat, Hsv, ParseColorError, Rgb,
    UnknownFormatError, FALLBACK_COLOR,
};
pub use config::{ConfigError, LogLevel, PickerConfig, CONFIG_VERSION};
pub use error::PickerError;
pub use interaction::PickerInteraction;
pub use picker::ColorPicker;
pub use scheduler::{DebouncedEmitter, Debouncer, EmissionScheduler};
