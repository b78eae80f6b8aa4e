//! Mock Machine Translator for testing
//!
//! A deterministic, API-free translator for exercising the run engine
//! without API keys or network access. It also records how many calls were
//! made and the highest number of calls in flight at once.
//!
//! # Example
//!
//! ```ignore
//! use polyglot_i18n_mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", &Language::from_code("fr")?).await.unwrap();
//!     assert_eq!(result, "hello_fr");
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use polyglot_i18n::Language;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append language code: "hello" → "hello_fr"
    Suffix,

    /// Predefined (text, language code) → translation, suffix otherwise
    Mappings(HashMap<(String, String), String>),

    /// Fail every call with this message
    Error(String),

    /// Fail calls for one language code, suffix for the rest
    FailLanguage { code: String, message: String },

    /// Fail calls whose text equals `text`, suffix for the rest
    FailText { text: String, message: String },

    /// Fail only `text` translated into `code`, suffix for the rest
    FailLeaf {
        text: String,
        code: String,
        message: String,
    },

    /// Return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Simulated per-call latency in milliseconds
    delay_ms: u64,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each translation will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `translate` calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn apply_translation(&self, text: &str, target: &Language) -> MtResult<String> {
        let suffixed = || format!("{}_{}", text, target.code());
        match &self.mode {
            MockMode::Suffix => Ok(suffixed()),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.code().to_string());
                Ok(map.get(&key).cloned().unwrap_or_else(suffixed))
            }
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::FailLanguage { code, message } if code == target.code() => {
                Err(MtError::TranslationError(message.clone()))
            }
            MockMode::FailText { text: bad, message } if bad == text => {
                Err(MtError::TranslationError(message.clone()))
            }
            MockMode::FailLeaf {
                text: bad,
                code,
                message,
            } if bad == text && code == target.code() => {
                Err(MtError::TranslationError(message.clone()))
            }
            MockMode::FailLanguage { .. } | MockMode::FailText { .. } | MockMode::FailLeaf { .. } => {
                Ok(suffixed())
            }
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(&self, text: &str, target: &Language) -> MtResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        let result = self.apply_translation(text, target);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
