//! Tonal ramp generation.
//!
//! Takes one input color and derives a nine step ramp (levels 100 to 900) that
//! keeps the input's hue and saturation and spaces lightness evenly. The level
//! closest to the input's own lightness is flagged as the target.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod hsl;
pub mod names;

pub use hsl::{hex_to_hsl, hsl_to_hex, HexColor, Hsl};
pub use names::nearest_name;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid color format `{0}`. Use #RRGGBB or #RGB")]
    InvalidColorFormat(String),
}

/// The fixed ramp levels, ascending.
pub const LEVELS: [u16; 9] = [100, 200, 300, 400, 500, 600, 700, 800, 900];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampEntry {
    pub level: u16,
    pub hex: String,
    pub is_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub palette: [RampEntry; 9],
    pub target_level: u16,
}

impl Palette {
    pub fn generate(color: HexColor) -> Palette {
        let Hsl { h, s, l } = color.to_hsl();
        let target_level = target_level(l);

        let palette = LEVELS.map(|level| RampEntry {
            level,
            hex: hsl_to_hex(h, s, level as f64 / 1000.),
            is_target: level == target_level,
        });

        Palette {
            palette,
            target_level,
        }
    }

    pub fn target(&self) -> &RampEntry {
        // target_level is always one of LEVELS
        &self.palette[(self.target_level / 100 - 1) as usize]
    }
}

/// Generates the ramp for a hex string, rejecting malformed input before any
/// color math happens.
pub fn generate_palette(hex: &str) -> Result<Palette> {
    HexColor::parse(hex).map(Palette::generate)
}

/// Maps a lightness fraction onto the ramp, `round(l * 10) * 100` clamped to
/// `100..=900`.
pub fn target_level(lightness: f64) -> u16 {
    let candidate = (lightness * 10.).round() * 100.;

    candidate.clamp(100., 900.) as u16
}
