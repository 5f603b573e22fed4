//! A user's projects and the operations the web client performs on them.
//!
//! Items inside a project are stored newest first. Every index taken by these
//! operations is a position in that stored order.

use indexmap::IndexMap;

use crate::history::{HistoryItem, SpacingChip};
use crate::{Error, Result, DEFAULT_PROJECT_NAME, NEW_PROJECT_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projects(IndexMap<String, Vec<HistoryItem>>);

impl Default for Projects {
    fn default() -> Self {
        let mut projects = IndexMap::new();
        projects.insert(DEFAULT_PROJECT_NAME.to_string(), vec![]);
        Projects(projects)
    }
}

/// A chip from a bookmarked spacing item, with the position it came from so
/// the client can toggle it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedSpacingChip {
    #[serde(flatten)]
    pub chip: SpacingChip,
    pub item_index: usize,
    pub chip_index: usize,
}

/// A single edit sent by the client, applied with [`Projects::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ProjectAction {
    Rename { from: String, to: String },
    Delete { project: String },
    Bookmark { project: String, index: usize },
    Unbookmark { project: String, index: usize },
    UnbookmarkSpacing { project: String },
    ToggleVisibility { project: String, index: usize, chip: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultColor {
    pub index: usize,
    pub item: HistoryItem,
}

/// The bookmarked part of a project, laid out the way the vault panel shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vault {
    pub spacing: Vec<MergedSpacingChip>,
    pub colors: Vec<VaultColor>,
}

impl Projects {
    pub fn apply(&mut self, action: ProjectAction) -> Result<()> {
        match action {
            ProjectAction::Rename { from, to } => self.rename(&from, &to),
            ProjectAction::Delete { project } => self.delete(&project),
            ProjectAction::Bookmark { project, index } => self.bookmark(&project, index),
            ProjectAction::Unbookmark { project, index } => self.unbookmark(&project, index),
            ProjectAction::UnbookmarkSpacing { project } => self.unbookmark_all_spacing(&project),
            ProjectAction::ToggleVisibility {
                project,
                index,
                chip,
            } => self.toggle_visibility(&project, index, chip).map(|_| ()),
        }
    }

    pub fn vault(&self, project: &str) -> Result<Vault> {
        Ok(Vault {
            spacing: self.merged_spacing_chips(project)?,
            colors: self
                .bookmarked_colors(project)?
                .into_iter()
                .map(|(index, item)| VaultColor {
                    index,
                    item: item.clone(),
                })
                .collect(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn items(&self, project: &str) -> Result<&[HistoryItem]> {
        self.0
            .get(project)
            .map(|items| items.as_slice())
            .ok_or_else(|| Error::project_not_found(project))
    }

    fn items_mut(&mut self, project: &str) -> Result<&mut Vec<HistoryItem>> {
        self.0
            .get_mut(project)
            .ok_or_else(|| Error::project_not_found(project))
    }

    fn item_mut(&mut self, project: &str, index: usize) -> Result<&mut HistoryItem> {
        self.items_mut(project)?
            .get_mut(index)
            .ok_or_else(|| Error::item_not_found(project, index))
    }

    /// First `New Project N`, counting from 1, that isn't taken yet.
    pub fn next_new_project_name(&self) -> String {
        (1..)
            .map(|n| format!("{} {}", NEW_PROJECT_PREFIX, n))
            .find(|name| !self.contains(name))
            .unwrap_or_else(|| NEW_PROJECT_PREFIX.to_string())
    }

    /// Inserts `item` at the front of `project`. Without an active project a
    /// fresh `New Project N` is created to hold it. Returns the project used.
    pub fn push_item(&mut self, project: Option<&str>, item: HistoryItem) -> String {
        let name = match project {
            Some(name) => name.to_string(),
            None => self.next_new_project_name(),
        };

        self.0.entry(name.clone()).or_default().insert(0, item);

        name
    }

    /// Renames a project in place, keeping its position. Renaming to an empty
    /// name or to the same name does nothing.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let to = to.trim();
        if to.is_empty() || to == from {
            return Ok(());
        }

        if self.contains(to) {
            return Err(Error::new(
                Error::PROJECT_EXISTS,
                "Project already exists",
                format!("A project named `{}` already exists", to),
            ));
        }

        if !self.contains(from) {
            return Err(Error::project_not_found(from));
        }

        self.0 = std::mem::take(&mut self.0)
            .into_iter()
            .map(|(name, items)| {
                if name == from {
                    (to.to_string(), items)
                } else {
                    (name, items)
                }
            })
            .collect();

        Ok(())
    }

    /// Deletes a project. The last remaining project can't be deleted.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(Error::project_not_found(name));
        }

        if self.0.len() == 1 {
            return Err(Error::new(
                Error::LAST_PROJECT,
                "Can't delete the last project",
                "At least one project has to remain",
            ));
        }

        self.0.shift_remove(name);

        Ok(())
    }

    /// Adds an item to the project's vault. Bookmarking forces every chip
    /// visible again.
    pub fn bookmark(&mut self, project: &str, index: usize) -> Result<()> {
        let item = self.item_mut(project, index)?;

        if item.is_bookmarked() {
            return Err(Error::new(
                Error::ALREADY_BOOKMARKED,
                "Already bookmarked",
                format!("`{}` is already in the vault", item.name()),
            ));
        }

        item.show_all_chips();
        item.set_bookmarked(true);

        Ok(())
    }

    pub fn unbookmark(&mut self, project: &str, index: usize) -> Result<()> {
        self.item_mut(project, index)?.set_bookmarked(false);

        Ok(())
    }

    /// Removes every spacing item of the project from the vault.
    pub fn unbookmark_all_spacing(&mut self, project: &str) -> Result<()> {
        self.items_mut(project)?
            .iter_mut()
            .filter(|item| item.is_spacing())
            .for_each(|item| item.set_bookmarked(false));

        Ok(())
    }

    /// Flips the visibility of one chip and returns its new value.
    pub fn toggle_visibility(&mut self, project: &str, index: usize, chip: usize) -> Result<bool> {
        self.item_mut(project, index)?.toggle_chip(chip)
    }

    /// Bookmarked color items with their indices.
    pub fn bookmarked_colors(&self, project: &str) -> Result<Vec<(usize, &HistoryItem)>> {
        Ok(self
            .items(project)?
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_bookmarked() && !item.is_spacing())
            .collect())
    }

    /// All chips of bookmarked spacing items merged into one scale. The first
    /// chip seen for a level wins, and the result is sorted by pixel value.
    pub fn merged_spacing_chips(&self, project: &str) -> Result<Vec<MergedSpacingChip>> {
        let mut seen = std::collections::HashSet::new();
        let mut merged = vec![];

        for (item_index, item) in self.items(project)?.iter().enumerate() {
            let spacing = match item {
                HistoryItem::Spacing(spacing) if spacing.is_bookmarked => spacing,
                _ => continue,
            };

            for (chip_index, chip) in spacing.palette.iter().enumerate() {
                if seen.insert(chip.level.clone()) {
                    merged.push(MergedSpacingChip {
                        chip: chip.clone(),
                        item_index,
                        chip_index,
                    });
                }
            }
        }

        merged.sort_by_key(|m| m.chip.value);

        Ok(merged)
    }
}
