//! Remote text generation through the Gemini API.
//!
//! The API key decides whether a remote backend exists at all. On startup the
//! available models are listed and the best `gemini` model that supports
//! `generateContent` is picked: a `flash` model if there is one, then a `pro`
//! model, then whatever came first.

use std::time::Duration;

use serde_json::json;

use crate::settings::GeminiSettings;
use crate::{Error, Result};

/// Sent as a header, never as part of the URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can turn a prompt into text.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Picks the model to use and returns its name without the `models/` prefix.
pub fn select_model(models: &[ModelInfo]) -> Option<String> {
    let usable: Vec<&ModelInfo> = models
        .iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
                && m.name.contains("gemini")
        })
        .collect();

    let best = usable
        .iter()
        .find(|m| m.name.contains("flash"))
        .or_else(|| usable.iter().find(|m| m.name.contains("pro")))
        .or_else(|| usable.first())?;

    Some(
        best.name
            .strip_prefix("models/")
            .unwrap_or(&best.name)
            .to_string(),
    )
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Lists the models available to the configured key and builds a client
    /// for the best one. Returns `Ok(None)` when no key is configured or no
    /// usable model exists.
    pub fn discover(settings: &GeminiSettings) -> Result<Option<Self>> {
        let api_key = match settings.api_key.as_deref() {
            Some(key) => key.to_string(),
            None => return Ok(None),
        };

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let api_base = settings.api_base.trim_end_matches('/').to_string();

        tracing::info!("Looking for an available Gemini model");

        let list: ModelList = http
            .get(format!("{}/v1beta/models", api_base))
            .header(API_KEY_HEADER, api_key.as_str())
            .send()?
            .error_for_status()?
            .json()?;

        match select_model(&list.models) {
            Some(model) => {
                tracing::info!(%model, "Using Gemini model");

                Ok(Some(GeminiClient {
                    http,
                    api_base,
                    api_key,
                    model,
                }))
            }
            None => {
                tracing::warn!("No usable Gemini model found");
                Ok(None)
            }
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let response: GenerateResponse = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.api_base, self.model
            ))
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()?
            .error_for_status()?
            .json()?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                Error::new(
                    Error::AI_REQUEST_FAILED,
                    "Empty AI response",
                    format!("Model `{}` returned no candidates", self.model),
                )
            })
    }
}
