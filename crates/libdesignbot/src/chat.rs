use std::sync::Arc;

use crate::gemini::TextGenerator;
use crate::{Error, Result};

/// Answers free-form design questions with the stored projects as context.
#[derive(Clone, Default)]
pub struct ChatService {
    generator: Option<Arc<dyn TextGenerator>>,
}

pub fn chat_prompt(message: &str, design_data: &serde_json::Value) -> String {
    format!(
        "You are a UI/UX design system expert. Use the following data to answer the question.\n[Data] {}\n[Question] {}",
        design_data, message
    )
}

impl ChatService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        ChatService { generator }
    }

    pub fn reply(&self, message: &str, design_data: &serde_json::Value) -> Result<String> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            Error::new(
                Error::AI_UNAVAILABLE,
                "No AI backend",
                "Chat needs a Gemini API key",
            )
        })?;

        generator.generate(&chat_prompt(message, design_data))
    }
}
