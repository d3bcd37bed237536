//! colorpick_model - color values for the picker
//!
//! Pure value layer of the color picker: RGB and HSV types, the conversions
//! between them, hex and CSS rendering, and parsing of externally supplied
//! color strings. Nothing here holds state or spawns threads.

pub mod constants;
mod model;
mod parse;

pub use model::{hsv_to_rgb, rgb_to_hsv, ColorFormat, Hsv, Rgb, UnknownFormatError};
pub use parse::{parse, parse_rgb, try_parse, ParseColorError, FALLBACK_COLOR};
