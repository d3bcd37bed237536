//! Numeric constants shared by the conversion and parsing code

/// Maximum value of an 8-bit color channel
pub const CHANNEL_MAX: f64 = 255.0;

/// Width of one hue sector in degrees
pub const HUE_SECTOR_DEGREES: f64 = 60.0;

/// Full turn of the hue circle in degrees
pub const HUE_TURN: i32 = 360;

/// Tolerance used when deciding which channel attains the maximum
pub const MAX_CHANNEL_EPSILON: f64 = 0.001;

/// Marker bit that forces the packed hex value to seven digits
pub const HEX_PAD_BIT: u32 = 0x0100_0000;

/// Hue of the color returned for unrecognized input
pub const FALLBACK_HUE: i32 = 180;
