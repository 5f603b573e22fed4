#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde;

pub use color_generator;
pub use serde_json;

pub mod chat;
pub mod gemini;
pub mod history;
pub mod input;
pub mod naming;
pub mod projects;
pub mod settings;
pub mod spacing;
pub mod store;
pub mod workflow;

pub use chat::ChatService;
pub use gemini::{GeminiClient, TextGenerator};
pub use history::{ColorChip, ColorItem, HistoryItem, SpacingChip, SpacingItem};
pub use input::{classify, UserInput};
pub use naming::NamingService;
pub use projects::{MergedSpacingChip, ProjectAction, Projects, Vault};
pub use settings::Settings;
pub use spacing::{spacing_tokens, Platform, PlatformSelection};
pub use store::ProjectStore;
pub use workflow::Generated;

use std::fmt;

pub const SETTINGS_FILE_NAME: &str = "designbot.yaml";
pub const DEFAULT_DATA_FILE: &str = "database.json";
pub const DEFAULT_PROJECT_NAME: &str = "Default Project";
pub const NEW_PROJECT_PREFIX: &str = "New Project";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Eq, PartialOrd, Ord)]
pub struct Error {
    pub code: usize,
    pub message: String,
    pub description: String,
}

impl Error {
    pub const INVALID_SETTINGS: usize = 10;
    pub const IO_ERROR: usize = 40;
    pub const INVALID_DATA_FILE: usize = 41;
    pub const EMPTY_INPUT: usize = 50;
    pub const INVALID_COLOR_FORMAT: usize = 51;
    pub const INVALID_REQUEST: usize = 52;
    pub const NO_PLATFORM_SELECTED: usize = 60;
    pub const UNKNOWN_PLATFORM: usize = 61;
    pub const PROJECT_NOT_FOUND: usize = 70;
    pub const PROJECT_EXISTS: usize = 71;
    pub const LAST_PROJECT: usize = 72;
    pub const ITEM_NOT_FOUND: usize = 73;
    pub const CHIP_NOT_FOUND: usize = 74;
    pub const ALREADY_BOOKMARKED: usize = 75;
    pub const AI_UNAVAILABLE: usize = 80;
    pub const AI_REQUEST_FAILED: usize = 81;

    pub fn new(code: usize, message: impl Into<String>, description: impl Into<String>) -> Self {
        Error {
            code,
            message: message.into(),
            description: description.into(),
        }
    }

    /// Errors caused by what the caller sent, as opposed to the environment.
    pub fn is_client_error(&self) -> bool {
        (Self::EMPTY_INPUT..Self::AI_UNAVAILABLE).contains(&self.code)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            Self::PROJECT_NOT_FOUND | Self::ITEM_NOT_FOUND | Self::CHIP_NOT_FOUND
        )
    }

    pub(crate) fn project_not_found(name: &str) -> Self {
        Error::new(
            Self::PROJECT_NOT_FOUND,
            "Project not found",
            format!("No project named `{}`", name),
        )
    }

    pub(crate) fn item_not_found(project: &str, index: usize) -> Self {
        Error::new(
            Self::ITEM_NOT_FOUND,
            "History item not found",
            format!("Project `{}` has no item at index {}", project, index),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.description)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for crate::Error {
    fn from(other: std::io::Error) -> Self {
        Error {
            code: Self::IO_ERROR,
            message: "IO error occurred".to_owned(),
            description: format!("{}", other),
        }
    }
}

impl From<serde_json::Error> for crate::Error {
    fn from(other: serde_json::Error) -> Self {
        Error {
            code: Self::INVALID_DATA_FILE,
            message: "Invalid JSON".to_owned(),
            description: format!("{}", other),
        }
    }
}

impl From<reqwest::Error> for crate::Error {
    fn from(other: reqwest::Error) -> Self {
        Error {
            code: Self::AI_REQUEST_FAILED,
            message: "AI request failed".to_owned(),
            description: format!("{}", other.without_url()),
        }
    }
}

impl From<color_generator::Error> for crate::Error {
    fn from(other: color_generator::Error) -> Self {
        Error {
            code: Self::INVALID_COLOR_FORMAT,
            message: "Invalid color".to_owned(),
            description: format!("{}", other),
        }
    }
}

/// Creation timestamp used as a history item id.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_leave_the_url_out() {
        let request_error = reqwest::blocking::Client::new()
            .get("http://127.0.0.1:1/v1beta/models?key=SUPERSECRETKEY")
            .send()
            .unwrap_err();

        let error = Error::from(request_error);

        assert_eq!(error.code, Error::AI_REQUEST_FAILED);
        assert!(!error.description.contains("SUPERSECRETKEY"), "{}", error);
    }
}
