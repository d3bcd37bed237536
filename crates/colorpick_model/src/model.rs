//! RGB and HSV value types and the conversions between them.
//!
//! The conversions mirror what an interactive picker needs rather than a
//! colorimetrically exact pipeline:
//! - HSV to RGB floors every channel, so results are biased low
//! - RGB to HSV truncates the hue to whole degrees
//!
//! Because of the truncation an HSV to RGB to HSV round trip is not exact.
//! Hex packing of an [`Rgb`] is exact in both directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CHANNEL_MAX, HEX_PAD_BIT, HUE_SECTOR_DEGREES, HUE_TURN, MAX_CHANNEL_EPSILON,
};

/// Textual encoding used when publishing a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#RRGGBB`, six uppercase hex digits, alpha dropped
    #[default]
    Hex,
    /// `rgba(R, G, B, A)` with the raw opacity as alpha
    Rgb,
}

impl ColorFormat {
    /// Lowercase name, as used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Rgb => "rgb",
        }
    }

    /// All formats in declaration order.
    pub fn all() -> &'static [ColorFormat] {
        &[ColorFormat::Hex, ColorFormat::Rgb]
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a [`ColorFormat`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color format '{0}', expected 'hex' or 'rgb'")]
pub struct UnknownFormatError(pub String);

impl FromStr for ColorFormat {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorFormat::all()
            .iter()
            .copied()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFormatError(s.to_string()))
    }
}

/// An 8-bit-per-channel color with a fractional opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

impl Rgb {
    /// Create a fully opaque color.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::with_opacity(red, green, blue, 1.0)
    }

    /// Create a color with an explicit opacity.
    pub const fn with_opacity(red: u8, green: u8, blue: u8, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    /// Pack the channels into `#RRGGBB`. Opacity is not encoded.
    pub fn to_hex(&self) -> String {
        let packed = HEX_PAD_BIT
            | u32::from(self.blue)
            | (u32::from(self.green) << 8)
            | (u32::from(self.red) << 16);
        // The pad bit always renders as a leading "1"
        let digits = format!("{packed:X}");
        format!("#{}", &digits[1..])
    }

    /// Render as `rgba(r, g, b, o)`.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.opacity
        )
    }

    /// Convert to HSV. See [`rgb_to_hsv`].
    pub fn to_hsv(&self) -> Hsv {
        rgb_to_hsv(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// A hue/saturation/value color.
///
/// `hue` is stored unreduced and taken modulo 360 where it is used.
/// Saturation and value are expected in `[0, 1]` but are not clamped here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in whole degrees
    pub hue: i32,
    /// Saturation as a fraction of full intensity
    pub saturation: f64,
    /// Value (brightness) as a fraction of full intensity
    pub value: f64,
    /// Opacity in `[0, 1]`
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for Hsv {
    fn default() -> Self {
        Self::new(0, 0.0, 0.0)
    }
}

impl Hsv {
    /// Create a fully opaque color.
    pub const fn new(hue: i32, saturation: f64, value: f64) -> Self {
        Self::with_opacity(hue, saturation, value, 1.0)
    }

    /// Create a color with an explicit opacity.
    pub const fn with_opacity(hue: i32, saturation: f64, value: f64, opacity: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
            opacity,
        }
    }

    /// Full saturation, full value color at this hue, used for hue previews.
    pub const fn base_hue(&self) -> Self {
        Self::new(self.hue, 1.0, 1.0)
    }

    /// Convert to RGB. See [`hsv_to_rgb`].
    pub fn to_rgb(&self) -> Rgb {
        hsv_to_rgb(self)
    }

    /// `#RRGGBB` of this color, through RGB.
    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }

    /// Render as `hsv(h, s, v, o)`.
    pub fn to_css(&self) -> String {
        format!(
            "hsv({}, {}, {}, {})",
            self.hue, self.saturation, self.value, self.opacity
        )
    }

    /// Render in the requested output format. Both formats go through RGB.
    pub fn format(&self, format: ColorFormat) -> String {
        let rgb = self.to_rgb();
        match format {
            ColorFormat::Hex => rgb.to_hex(),
            ColorFormat::Rgb => rgb.to_css(),
        }
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Opacity: {}, Hue: {}, Saturation: {}, Value: {}",
            self.opacity, self.hue, self.saturation, self.value
        )
    }
}

/// Convert HSV to RGB by hue-sector decomposition.
///
/// The hue is reduced with `rem_euclid`, so negative hues wrap instead of
/// indexing outside the sector table. Each channel is `floor((m + c) * 255)`;
/// channels outside `[0, 255]` (from out-of-range saturation or value)
/// saturate at the channel bounds.
pub fn hsv_to_rgb(hsv: &Hsv) -> Rgb {
    let sector = f64::from(hsv.hue.rem_euclid(HUE_TURN)) / HUE_SECTOR_DEGREES;
    let chroma = hsv.value * hsv.saturation;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = hsv.value - chroma;

    let (red, green, blue) = match sector.floor() as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb {
        red: to_channel(m + red),
        green: to_channel(m + green),
        blue: to_channel(m + blue),
        opacity: hsv.opacity,
    }
}

/// Float-to-int `as` casts saturate, which keeps the channel in range.
fn to_channel(fraction: f64) -> u8 {
    (fraction * CHANNEL_MAX).floor() as u8
}

/// Convert RGB to HSV by max/min channel decomposition.
///
/// Ties for the maximum channel resolve red first, then green, then blue.
/// The hue is truncated to whole degrees.
pub fn rgb_to_hsv(rgb: &Rgb) -> Hsv {
    let r = f64::from(rgb.red) / CHANNEL_MAX;
    let g = f64::from(rgb.green) / CHANNEL_MAX;
    let b = f64::from(rgb.blue) / CHANNEL_MAX;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let sector = if chroma == 0.0 {
        0.0
    } else if (max - r).abs() < MAX_CHANNEL_EPSILON {
        let h = (g - b) / chroma;
        if h < 0.0 { h + 6.0 } else { h }
    } else if (max - g).abs() < MAX_CHANNEL_EPSILON {
        2.0 + (b - r) / chroma
    } else {
        4.0 + (r - g) / chroma
    };

    let saturation = if max == 0.0 { 0.0 } else { chroma / max };

    Hsv {
        hue: (sector * HUE_SECTOR_DEGREES) as i32,
        saturation,
        value: max,
        opacity: rgb.opacity,
    }
}
