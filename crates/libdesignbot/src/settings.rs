//! Settings for a designbot server backed by a `designbot.yaml` file.

use crate::{Error, Result, DEFAULT_DATA_FILE, SETTINGS_FILE_NAME};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Content of the `designbot.yaml` file, after environment overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub port: u16,
    pub data_file: PathBuf,
    /// Prebuilt web client to serve for every non-API route.
    pub web_dir: Option<PathBuf>,
    pub gemini: GeminiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            web_dir: None,
            gemini: GeminiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeminiSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        GeminiSettings {
            api_key: None,
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn parse(input: &str) -> Result<Self> {
        use serde_yaml::Value;

        let invalid = |e: serde_yaml::Error| {
            Error::new(
                Error::INVALID_SETTINGS,
                format!("Invalid {}", SETTINGS_FILE_NAME),
                format!(
                    "There was an error parsing your {}:\n\n{}",
                    SETTINGS_FILE_NAME, e
                ),
            )
        };

        if input.trim().is_empty() {
            return Ok(Settings::default());
        }

        let value: Value = serde_yaml::from_str(input).map_err(invalid)?;

        // An empty document is valid and means "all defaults"
        if value.is_null() {
            return Ok(Settings::default());
        }

        serde_yaml::from_value(value).map_err(invalid)
    }

    /// Reads `designbot.yaml` from `working_dir`, falling back to defaults when
    /// the file doesn't exist. Relative paths are resolved against `working_dir`.
    pub fn load(working_dir: &Path) -> Result<Self> {
        let path = working_dir.join(SETTINGS_FILE_NAME);

        let mut settings = if path.exists() {
            Settings::parse(&std::fs::read_to_string(&path)?)?
        } else {
            Settings::default()
        };

        settings.resolve_paths(working_dir);

        Ok(settings)
    }

    /// Applies `PORT`, `GEMINI_API_KEY`, `DESIGNBOT_DATA_FILE` and
    /// `DESIGNBOT_WEB_DIR` overrides, looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = var("PORT") {
            self.port = port.trim().parse().map_err(|_| {
                Error::new(
                    Error::INVALID_SETTINGS,
                    "Invalid PORT",
                    format!("Expected a port number, found `{}`", port),
                )
            })?;
        }

        if let Some(key) = var("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.gemini.api_key = Some(key);
        }

        if let Some(data_file) = var("DESIGNBOT_DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }

        if let Some(web_dir) = var("DESIGNBOT_WEB_DIR") {
            self.web_dir = Some(PathBuf::from(web_dir));
        }

        Ok(())
    }

    fn resolve_paths(&mut self, working_dir: &Path) {
        if self.data_file.is_relative() {
            self.data_file = working_dir.join(&self.data_file);
        }

        if let Some(web_dir) = self.web_dir.as_mut() {
            if web_dir.is_relative() {
                *web_dir = working_dir.join(web_dir.as_path());
            }
        }
    }
}
