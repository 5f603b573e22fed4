use std::sync::Arc;

use color_generator::{nearest_name, HexColor};

use crate::gemini::TextGenerator;
use crate::{Error, Result};

/// Names colors for display. Always produces a name: when the remote generator
/// is missing or fails, the offline table decides.
#[derive(Clone, Default)]
pub struct NamingService {
    generator: Option<Arc<dyn TextGenerator>>,
}

pub fn naming_prompt(color: HexColor) -> String {
    format!(
        "Analyze the HEX code {}. Give me a descriptive English color name. Reply ONLY with the name.",
        color
    )
}

/// Strips quotes and line breaks models like to wrap names in.
fn clean_reply(reply: &str) -> String {
    reply.trim().replace(&['"', '\'', '\n'][..], "")
}

impl NamingService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        NamingService { generator }
    }

    pub fn offline() -> Self {
        NamingService::default()
    }

    pub fn name_for(&self, color: HexColor) -> String {
        if self.generator.is_some() {
            match self.remote_name(color) {
                Ok(name) => return name,
                Err(e) => tracing::warn!(%color, error = %e, "Falling back to offline color name"),
            }
        }

        nearest_name(color).to_string()
    }

    fn remote_name(&self, color: HexColor) -> Result<String> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            Error::new(
                Error::AI_UNAVAILABLE,
                "No AI backend",
                "No remote text generator is configured",
            )
        })?;

        let name = clean_reply(&generator.generate(&naming_prompt(color))?);

        if name.trim().is_empty() {
            return Err(Error::new(
                Error::AI_REQUEST_FAILED,
                "Empty AI response",
                format!("No name returned for {}", color),
            ));
        }

        Ok(name.trim().to_string())
    }
}
