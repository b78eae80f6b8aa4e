//! Google Translate API v2 provider
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable and sends it in the `x-goog-api-key` header, never in
//! the URL. Source text is always English; the target is the language code
//! from the catalog.

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use polyglot_i18n::Language;
use serde_json::json;

const SOURCE_LANGUAGE: &str = "en";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GoogleTranslateProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    pub fn new(api_key: String) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            MtError::ConfigError(
                "GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::new(api_key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(&self, text: &str, target: &Language) -> MtResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        if text.chars().count() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        let body = json!({
            "q": [text],
            "source": SOURCE_LANGUAGE,
            "target": target.code(),
            "format": "text"
        });

        let response = self
            .client
            .post(&self.base_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                MtError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                MtError::TranslationError(format!("API server error ({}): {}", status, error_text))
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MtError::TranslationError(
                    "Invalid API response: missing 'data.translations[0].translatedText'"
                        .to_string(),
                )
            })
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn german() -> Language {
        Language::from_code("de").unwrap()
    }

    #[test]
    fn test_new_with_empty_key() {
        match GoogleTranslateProvider::new("".to_string()) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_debug_output() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("test-key"));
    }

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        assert_eq!(provider.translate("", &german()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let long_text = "x".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING + 1);
        match provider.translate(&long_text, &german()).await {
            Err(MtError::TranslationError(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected TranslationError"),
        }
    }

    #[tokio::test]
    async fn test_length_limit_counts_characters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"translations": [{"translatedText": "ok"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url(server.uri());
        // Two bytes per character: over the limit in bytes, within it in characters
        let text = "é".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING);
        assert_eq!(provider.translate(&text, &german()).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_network_error_does_not_expose_api_key() {
        let provider = GoogleTranslateProvider::new("SECRET-KEY-123".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:1/v2");

        match provider.translate("Hello", &german()).await {
            Err(MtError::NetworkError(msg)) => assert!(!msg.contains("SECRET-KEY-123"), "{}", msg),
            other => panic!("Expected NetworkError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_key_not_sent_in_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header(API_KEY_HEADER, "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"translations": [{"translatedText": "Hallo"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url(server.uri());
        assert_eq!(provider.translate("Hello", &german()).await.unwrap(), "Hallo");
    }

    #[tokio::test]
    async fn test_translate_uses_language_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(API_KEY_HEADER, "test-key"))
            .and(wiremock::matchers::body_partial_json(json!({"target": "de", "source": "en"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"translations": [{"translatedText": "Hallo"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url(server.uri());
        assert_eq!(provider.translate("Hello", &german()).await.unwrap(), "Hallo");
    }

    #[tokio::test]
    async fn test_client_error_is_config_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new("bad".to_string())
            .unwrap()
            .with_base_url(server.uri());
        assert!(matches!(
            provider.translate("Hello", &german()).await,
            Err(MtError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_translations() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url(server.uri());
        assert!(matches!(
            provider.translate("Hello", &german()).await,
            Err(MtError::TranslationError(_))
        ));
    }
}
