use color_generator::HexColor;
use regex::Regex;

use crate::{Error, Result};

lazy_static! {
    /// `RGB` or `RRGGBB`, optionally prefixed with `#`
    static ref HEX_REGEX: Regex = Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

const SPACING_TRIGGERS: &[&str] = &["spacing", "스페이싱"];

/// What a line typed into the generator asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// The user wants spacing tokens and still has to pick platforms.
    SpacingRequest,
    Color {
        /// The input as typed, with a `#` added when it was missing.
        raw_input: String,
        color: HexColor,
    },
}

/// Sorts raw user input into a spacing request or a validated color.
///
/// Anything that is neither is rejected here, so the palette generator only
/// ever sees well formed colors.
pub fn classify(raw: &str) -> Result<UserInput> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::new(
            Error::EMPTY_INPUT,
            "Empty input",
            "Type a hex color such as #3B82F6, or ask for spacing",
        ));
    }

    let lowercase = trimmed.to_lowercase();
    if SPACING_TRIGGERS.iter().any(|t| lowercase.contains(t)) {
        return Ok(UserInput::SpacingRequest);
    }

    if !HEX_REGEX.is_match(trimmed) {
        return Err(Error::new(
            Error::INVALID_COLOR_FORMAT,
            "Invalid color",
            format!("`{}` is not a hex color. Use #RRGGBB or #RGB", trimmed),
        ));
    }

    let raw_input = if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{}", trimmed)
    };

    Ok(UserInput::Color {
        color: HexColor::parse(&raw_input)?,
        raw_input,
    })
}
