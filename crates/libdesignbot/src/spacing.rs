use std::fmt;
use std::str::FromStr;

use crate::history::SpacingChip;
use crate::{Error, Result};

/// Base spacing unit in pixels.
const UNIT: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Pc,
    Tablet,
    Mobile,
    All,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Pc => "pc",
            Platform::Tablet => "tablet",
            Platform::Mobile => "mobile",
            Platform::All => "all",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pc" => Ok(Platform::Pc),
            "tablet" => Ok(Platform::Tablet),
            "mobile" => Ok(Platform::Mobile),
            "all" => Ok(Platform::All),
            other => Err(Error::new(
                Error::UNKNOWN_PLATFORM,
                "Unknown platform",
                format!("Expected one of pc, tablet, mobile or all, found `{}`", other),
            )),
        }
    }
}

/// The set of platforms picked for a spacing request.
///
/// `all` is exclusive: picking it clears everything else, and picking any other
/// platform drops it again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformSelection(Vec<Platform>);

impl PlatformSelection {
    pub fn new() -> Self {
        PlatformSelection::default()
    }

    pub fn toggle(&mut self, platform: Platform) {
        if platform == Platform::All {
            self.0 = vec![Platform::All];
            return;
        }

        self.0.retain(|p| *p != Platform::All);

        if let Some(position) = self.0.iter().position(|p| *p == platform) {
            self.0.remove(position);
        } else {
            self.0.push(platform);
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.0
    }
}

/// Applies each platform as if it was picked in order. Repeats are ignored
/// rather than toggled off.
impl FromIterator<Platform> for PlatformSelection {
    fn from_iter<I: IntoIterator<Item = Platform>>(iter: I) -> Self {
        let mut selection = PlatformSelection::new();
        for platform in iter {
            if !selection.0.contains(&platform) {
                selection.toggle(platform);
            }
        }
        selection
    }
}

/// Builds the spacing scale for the selected platforms.
///
/// Every scale starts with a 2px half step followed by multiples of 4px. Desktop
/// scales (`pc` or `all`) run to 15 steps plus two large section gaps, tablet
/// scales to 12 steps and mobile scales to 9.
pub fn spacing_tokens(platforms: &[Platform]) -> Result<Vec<SpacingChip>> {
    if platforms.is_empty() {
        return Err(Error::new(
            Error::NO_PLATFORM_SELECTED,
            "No platform selected",
            "Pick at least one of pc, tablet, mobile or all",
        ));
    }

    let desktop = platforms
        .iter()
        .any(|p| matches!(p, Platform::Pc | Platform::All));

    let max_step = if desktop {
        15
    } else if platforms.contains(&Platform::Tablet) {
        12
    } else {
        9
    };

    let chip = |level: String, value: u32| SpacingChip {
        level,
        value,
        is_visible: true,
    };

    let mut tokens = vec![chip("sp0.5".to_string(), UNIT / 2)];
    tokens.extend((1..=max_step).map(|i| chip(format!("sp{}", i), i * UNIT)));

    if desktop {
        tokens.push(chip("sp20".to_string(), 20 * UNIT));
        tokens.push(chip("sp25".to_string(), 25 * UNIT));
    }

    Ok(tokens)
}
