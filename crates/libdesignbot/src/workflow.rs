//! What happens when a user submits the generator input.

use color_generator::Palette;

use crate::history::{ColorItem, HistoryItem, SpacingItem};
use crate::input::{classify, UserInput};
use crate::naming::NamingService;
use crate::spacing::{spacing_tokens, Platform};
use crate::{now_millis, Projects, Result, NEW_PROJECT_PREFIX};

pub const SPACING_USER_INPUT: &str = "Spacing request";
pub const SPACING_ITEM_NAME: &str = "Spacing System";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// The input asked for spacing. Nothing was stored, the caller has to ask
    /// for platforms and call [`add_spacing`].
    SpacingRequested,
    Color { project: String, item: HistoryItem },
}

/// Classifies `raw`, and for colors generates the ramp, names it and stores it
/// at the front of `active_project` (or a new project when none is active).
pub fn generate(
    raw: &str,
    projects: &mut Projects,
    active_project: Option<&str>,
    naming: &NamingService,
) -> Result<Generated> {
    let (raw_input, color) = match classify(raw)? {
        UserInput::SpacingRequest => return Ok(Generated::SpacingRequested),
        UserInput::Color { raw_input, color } => (raw_input, color),
    };

    let palette = Palette::generate(color);
    let name = naming.name_for(color);

    tracing::debug!(%color, target_level = palette.target_level, %name, "Generated palette");

    let item = HistoryItem::Color(ColorItem::new(now_millis(), raw_input, name, palette));
    let project = projects.push_item(active_project, item.clone());

    Ok(Generated::Color { project, item })
}

/// Generates spacing tokens for `platforms` and stores them at the front of
/// `active_project`, or of a plain `New Project` when none is active.
pub fn add_spacing(
    platforms: &[Platform],
    projects: &mut Projects,
    active_project: Option<&str>,
) -> Result<(String, HistoryItem)> {
    let item = HistoryItem::Spacing(SpacingItem {
        id: now_millis(),
        user_input: SPACING_USER_INPUT.to_string(),
        name: SPACING_ITEM_NAME.to_string(),
        palette: spacing_tokens(platforms)?,
        is_bookmarked: false,
    });

    let project = projects.push_item(
        Some(active_project.unwrap_or(NEW_PROJECT_PREFIX)),
        item.clone(),
    );

    Ok((project, item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, DEFAULT_PROJECT_NAME};
    use pretty_assertions::assert_eq;

    #[test]
    fn spacing_input_stores_nothing() {
        let mut projects = Projects::default();

        let generated = generate("spacing", &mut projects, None, &NamingService::offline());

        assert_eq!(generated.unwrap(), Generated::SpacingRequested);
        assert_eq!(projects, Projects::default());
    }

    #[test]
    fn colors_are_stored_in_the_active_project() {
        let mut projects = Projects::default();

        let generated = generate(
            "3B82F6",
            &mut projects,
            Some(DEFAULT_PROJECT_NAME),
            &NamingService::offline(),
        )
        .unwrap();

        let (project, item) = match generated {
            Generated::Color { project, item } => (project, item),
            other => panic!("Expected a color, got {:?}", other),
        };

        assert_eq!(project, DEFAULT_PROJECT_NAME);
        assert_eq!(projects.items(DEFAULT_PROJECT_NAME).unwrap(), &[item.clone()]);

        match item {
            HistoryItem::Color(color) => {
                assert_eq!(color.user_input, "#3B82F6");
                assert_eq!(color.target, 600);
                assert!(color.palette[5].is_target);
                assert!(color.palette.iter().all(|c| c.is_visible));
                assert!(!color.is_bookmarked);
                assert!(!color.name.is_empty());
            }
            other => panic!("Expected a color item, got {:?}", other),
        }
    }

    #[test]
    fn colors_without_a_project_start_a_new_one() {
        let mut projects = Projects::default();

        let generated = generate("#000", &mut projects, None, &NamingService::offline()).unwrap();

        match generated {
            Generated::Color { project, .. } => assert_eq!(project, "New Project 1"),
            other => panic!("Expected a color, got {:?}", other),
        }
    }

    #[test]
    fn invalid_colors_store_nothing() {
        let mut projects = Projects::default();

        let error = generate("#12345", &mut projects, None, &NamingService::offline()).unwrap_err();

        assert_eq!(error.code, Error::INVALID_COLOR_FORMAT);
        assert_eq!(projects, Projects::default());
    }

    #[test]
    fn spacing_goes_to_a_plain_new_project_without_an_active_one() {
        let mut projects = Projects::default();

        let (project, item) = add_spacing(&[Platform::Mobile], &mut projects, None).unwrap();

        assert_eq!(project, NEW_PROJECT_PREFIX);
        assert!(item.is_spacing());
        assert_eq!(item.name(), SPACING_ITEM_NAME);
        assert_eq!(item.chip_count(), 10);
    }

    #[test]
    fn spacing_needs_a_platform() {
        let mut projects = Projects::default();

        let error = add_spacing(&[], &mut projects, Some(DEFAULT_PROJECT_NAME)).unwrap_err();

        assert_eq!(error.code, Error::NO_PLATFORM_SELECTED);
        assert_eq!(projects, Projects::default());
    }
}
