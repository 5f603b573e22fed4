//! Conversions between hex color strings and HSL.
//!
//! The HSL triple uses mixed units: hue in degrees, saturation in percent and
//! lightness as a fraction between 0 and 1. Palette generation and stored
//! ramps depend on this exact scale, so keep it consistent when adding new
//! conversions.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Degrees, `[0, 360)`
    pub h: f64,
    /// Percent, `[0, 100]`
    pub s: f64,
    /// Fraction, `[0, 1]`
    pub l: f64,
}

/// An exact sRGB color with 8-bit channels.
///
/// Parsing accepts `RGB`, `RRGGBB`, with or without a leading `#`, in any case.
/// Displays as `#RRGGBB` in uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor { r, g, b }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColorFormat(input.to_string()));
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(Error::InvalidColorFormat(input.to_string())),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| Error::InvalidColorFormat(input.to_string()))
        };

        Ok(HexColor {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_hsl(&self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HexColor::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Converts a hex string (`abc`, `#abc`, `aabbcc` or `#AABBCC`) to HSL.
///
/// Returns [`Error::InvalidColorFormat`] for anything else, before doing any
/// color math.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl> {
    HexColor::parse(hex).map(|c| c.to_hsl())
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.;
    let g = g as f64 / 255.;
    let b = b as f64 / 255.;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.;

    if max == min {
        return Hsl { h: 0., s: 0., l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2. - max - min)
    } else {
        d / (max + min)
    };

    // Ties go to the first channel in r, g, b order
    let sector = if max == r {
        (g - b) / d + if g < b { 6. } else { 0. }
    } else if max == g {
        (b - r) / d + 2.
    } else {
        (r - g) / d + 4.
    };

    Hsl {
        h: sector / 6. * 360.,
        s: s * 100.,
        l,
    }
}

/// Converts HSL back into an uppercase `#RRGGBB` string.
///
/// Lightness is clamped into `[0, 1]` first, so out of range values are safe.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let l = l.clamp(0., 1.);
    let s = s / 100.;
    let a = s * l.min(1. - l);

    let f = |n: f64| {
        let k = (n + h / 30.) % 12.;
        l - a * (k - 3.).min(9. - k).min(1.).max(-1.)
    };

    let to_byte = |x: f64| (x * 255.).round().clamp(0., 255.) as u8;

    HexColor::from_rgb(to_byte(f(0.)), to_byte(f(8.)), to_byte(f(4.))).to_string()
}
