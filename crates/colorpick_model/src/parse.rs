//! Parsing of externally supplied color strings.
//!
//! Two syntaxes are recognized:
//! - `#RGB` and `#RRGGBB` with case-insensitive hex digits
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)`, with `a` a fraction or a percentage
//!
//! [`parse`] never fails: anything it does not recognize becomes
//! [`FALLBACK_COLOR`]. [`try_parse`] reports why a string was rejected.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::constants::{CHANNEL_MAX, FALLBACK_HUE};
use crate::model::{Hsv, Rgb};

/// Color returned by [`parse`] for input it cannot read.
pub const FALLBACK_COLOR: Hsv = Hsv::new(FALLBACK_HUE, 1.0, 1.0);

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("hex color regex is valid")
});

/// Matched against the input with all whitespace removed.
static RGBA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^rgba?\((?P<r>[.\d]+),(?P<g>[.\d]+),(?P<b>[.\d]+)(?:[,/](?P<a>[.\d]+%?))?\)$",
    )
    .expect("rgba color regex is valid")
});

/// Reasons a string is not a supported color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Nothing but whitespace
    #[error("Empty color string")]
    Empty,

    /// Starts with `#` but is not 3 or 6 hex digits
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    /// Neither hex nor `rgb()`/`rgba()`
    #[error("Unsupported color syntax: {0}")]
    UnsupportedSyntax(String),

    /// A captured component is not a number
    #[error("Invalid {channel} component: {value}")]
    InvalidComponent {
        /// Which component failed (`red`, `green`, `blue` or `alpha`)
        channel: &'static str,
        /// The offending text
        value: String,
    },
}

/// Parse a color string into HSV, falling back to [`FALLBACK_COLOR`].
pub fn parse(text: &str) -> Hsv {
    try_parse(text).unwrap_or_else(|err| {
        log::debug!("Color {:?} not recognized ({}), using fallback", text, err);
        FALLBACK_COLOR
    })
}

/// Parse a color string into HSV.
pub fn try_parse(text: &str) -> Result<Hsv, ParseColorError> {
    parse_rgb(text).map(|rgb| rgb.to_hsv())
}

/// Parse a color string into RGB, before any HSV conversion.
pub fn parse_rgb(text: &str) -> Result<Rgb, ParseColorError> {
    let color = text.trim();
    if color.is_empty() {
        return Err(ParseColorError::Empty);
    }

    if HEX_RE.is_match(color) {
        return parse_hex(&color[1..]);
    }
    if color.starts_with('#') {
        return Err(ParseColorError::InvalidHex(color.to_string()));
    }

    let compact: String = color.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = RGBA_RE
        .captures(&compact)
        .ok_or_else(|| ParseColorError::UnsupportedSyntax(color.to_string()))?;

    let red = parse_channel("red", &caps["r"])?;
    let green = parse_channel("green", &caps["g"])?;
    let blue = parse_channel("blue", &caps["b"])?;
    let opacity = match caps.name("a") {
        Some(alpha) => parse_alpha(alpha.as_str())?,
        None => 1.0,
    };

    Ok(Rgb::with_opacity(red, green, blue, opacity))
}

/// `digits` is the matched text without the leading `#`.
fn parse_hex(digits: &str) -> Result<Rgb, ParseColorError> {
    let packed = u32::from_str_radix(digits, 16)
        .map_err(|_| ParseColorError::InvalidHex(format!("#{digits}")))?;
    let packed = if digits.len() == 3 {
        expand_shorthand(packed)
    } else {
        packed
    };

    Ok(Rgb::new(
        ((packed & 0xFF_0000) >> 16) as u8,
        ((packed & 0x00_FF00) >> 8) as u8,
        (packed & 0x00_00FF) as u8,
    ))
}

/// `0xRGB` to `0xRRGGBB`
fn expand_shorthand(packed: u32) -> u32 {
    let r = (packed >> 8) & 0xF;
    let g = (packed >> 4) & 0xF;
    let b = packed & 0xF;
    ((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)
}

fn parse_channel(channel: &'static str, text: &str) -> Result<u8, ParseColorError> {
    let value = parse_number(channel, text)?;
    Ok(value.round().clamp(0.0, CHANNEL_MAX) as u8)
}

fn parse_alpha(text: &str) -> Result<f64, ParseColorError> {
    let alpha = match text.strip_suffix('%') {
        Some(percent) => parse_number("alpha", percent)? / 100.0,
        None => parse_number("alpha", text)?,
    };
    Ok(alpha.clamp(0.0, 1.0))
}

fn parse_number(channel: &'static str, text: &str) -> Result<f64, ParseColorError> {
    text.parse::<f64>()
        .map_err(|_| ParseColorError::InvalidComponent {
            channel,
            value: text.to_string(),
        })
}
