use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::{Error, Projects, Result};

/// Per-user projects in a single JSON file, keyed by email.
///
/// Every save reads the whole file, replaces one user's entry and writes the
/// whole file back, so the last write wins.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Opens the store, creating an empty one if the file doesn't exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, "{}")?;
        }

        Ok(ProjectStore { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<IndexMap<String, Projects>> {
        let contents = std::fs::read_to_string(&self.path)?;

        serde_json::from_str(&contents).map_err(|e| {
            Error::new(
                Error::INVALID_DATA_FILE,
                "Invalid data file",
                format!("Could not read {}: {}", self.path.display(), e),
            )
        })
    }

    fn write(&self, data: &IndexMap<String, Projects>) -> Result<()> {
        std::fs::write(&self.path, serde_json::to_string_pretty(data)?)?;

        Ok(())
    }

    /// The user's projects, or the default project map for unknown users.
    pub fn load(&self, email: &str) -> Result<Projects> {
        Ok(self.read()?.shift_remove(email).unwrap_or_default())
    }

    pub fn save(&self, email: &str, projects: &Projects) -> Result<()> {
        let mut data = self.read()?;
        data.insert(email.to_string(), projects.clone());

        self.write(&data)
    }

    /// The whole file as JSON.
    pub fn dump(&self) -> Result<serde_json::Value> {
        let contents = std::fs::read_to_string(&self.path)?;

        Ok(serde_json::from_str(&contents)?)
    }
}
