//! Global constants for the color picker

use std::time::Duration;

/// Pixels per logical size unit of the saturation/value surface
pub const UNIT_PIXEL: f64 = 10.0;

/// Default surface size in logical units
pub const DEFAULT_SIZE: f64 = 22.0;

/// Quiet period before a burst of changes is published
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(50);

/// Opacity edits smaller than this are ignored
pub const OPACITY_EPSILON: f64 = 0.01;

/// Name of the background thread that fires publishes
pub const TIMER_THREAD_NAME: &str = "colorpick-emission";
