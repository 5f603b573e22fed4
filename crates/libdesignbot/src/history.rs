//! Stored generation results.
//!
//! Every generation a user runs lands in a project as a [`HistoryItem`]. The
//! JSON layout matches what the web client reads and writes, so field names
//! are camelCase and the item kind lives in a `type` tag.

use color_generator::{Palette, RampEntry};

use crate::{Error, Result};

fn visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorChip {
    pub level: u16,
    pub hex: String,
    pub is_target: bool,
    #[serde(default = "visible")]
    pub is_visible: bool,
}

impl From<RampEntry> for ColorChip {
    fn from(entry: RampEntry) -> Self {
        ColorChip {
            level: entry.level,
            hex: entry.hex,
            is_target: entry.is_target,
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingChip {
    /// Token name, `sp0.5`, `sp1`, ...
    pub level: String,
    /// Pixels
    pub value: u32,
    #[serde(default = "visible")]
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorItem {
    pub id: i64,
    pub user_input: String,
    pub name: String,
    pub palette: [ColorChip; 9],
    pub target: u16,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl ColorItem {
    pub fn new(id: i64, user_input: String, name: String, palette: Palette) -> Self {
        ColorItem {
            id,
            user_input,
            name,
            target: palette.target_level,
            palette: palette.palette.map(ColorChip::from),
            is_bookmarked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingItem {
    pub id: i64,
    pub user_input: String,
    pub name: String,
    pub palette: Vec<SpacingChip>,
    #[serde(default)]
    pub is_bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryItem {
    Color(ColorItem),
    Spacing(SpacingItem),
}

impl HistoryItem {
    pub fn id(&self) -> i64 {
        match self {
            HistoryItem::Color(item) => item.id,
            HistoryItem::Spacing(item) => item.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            HistoryItem::Color(item) => &item.name,
            HistoryItem::Spacing(item) => &item.name,
        }
    }

    pub fn is_spacing(&self) -> bool {
        matches!(self, HistoryItem::Spacing(_))
    }

    pub fn is_bookmarked(&self) -> bool {
        match self {
            HistoryItem::Color(item) => item.is_bookmarked,
            HistoryItem::Spacing(item) => item.is_bookmarked,
        }
    }

    pub fn set_bookmarked(&mut self, bookmarked: bool) {
        match self {
            HistoryItem::Color(item) => item.is_bookmarked = bookmarked,
            HistoryItem::Spacing(item) => item.is_bookmarked = bookmarked,
        }
    }

    pub fn chip_count(&self) -> usize {
        match self {
            HistoryItem::Color(item) => item.palette.len(),
            HistoryItem::Spacing(item) => item.palette.len(),
        }
    }

    pub fn show_all_chips(&mut self) {
        match self {
            HistoryItem::Color(item) => item.palette.iter_mut().for_each(|c| c.is_visible = true),
            HistoryItem::Spacing(item) => {
                item.palette.iter_mut().for_each(|c| c.is_visible = true)
            }
        }
    }

    /// Flips one chip's visibility and returns the new value.
    pub fn toggle_chip(&mut self, chip: usize) -> Result<bool> {
        let visibility = match self {
            HistoryItem::Color(item) => item.palette.get_mut(chip).map(|c| &mut c.is_visible),
            HistoryItem::Spacing(item) => item.palette.get_mut(chip).map(|c| &mut c.is_visible),
        };

        match visibility {
            Some(visible) => {
                *visible = !*visible;
                Ok(*visible)
            }
            None => Err(Error::new(
                Error::CHIP_NOT_FOUND,
                "Chip not found",
                format!("Item has no chip at index {}", chip),
            )),
        }
    }
}
