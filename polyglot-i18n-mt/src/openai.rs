//! OpenAI chat completions provider
//!
//! Each string is sent as a single user message asking for a translation
//! into the target language's display name.
//!
//! # Authentication
//!
//! The provider loads its settings from the environment:
//!
//! - `OPENAI_API_KEY` (required)
//! - `OPENAI_MODEL` (default `gpt-3.5-turbo`)
//! - `OPENAI_API_URL` (default `https://api.openai.com/v1/chat/completions`)

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use polyglot_i18n::Language;
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

fn build_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following English text to {}: {}",
        target_language, text
    )
}

#[derive(Clone)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a provider with an explicit API key and the default model
    pub fn new(api_key: String) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            client,
        })
    }

    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            MtError::ConfigError("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let mut provider = Self::new(api_key)?;
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            provider = provider.with_model(model);
        }
        if let Ok(url) = std::env::var("OPENAI_API_URL") {
            provider = provider.with_api_url(url);
        }
        Ok(provider)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for OpenAiProvider {
    async fn translate(&self, text: &str, target: &Language) -> MtResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user".to_string(),
                content: build_prompt(text, target.name()),
            }],
            temperature: 1.0,
            max_tokens: 256,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));

            return Err(if status.as_u16() == 401 || status.as_u16() == 403 {
                MtError::ConfigError(format!("OpenAI API rejected credentials ({}): {}", status, body))
            } else {
                MtError::TranslationError(format!("OpenAI API error ({}): {}", status, body))
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| {
                MtError::TranslationError("OpenAI response contained no choices".to_string())
            })
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}
