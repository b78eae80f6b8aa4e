//! Machine Translation trait
//!
//! `MachineTranslator` is the only seam between the run engine and an
//! external translation service. One call translates one string into one
//! target language; the engine decides how many calls run at once.
//!
//! # Example
//!
//! ```ignore
//! use polyglot_i18n::Language;
//! use polyglot_i18n_mt::{MachineTranslator, OpenAiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAiProvider::from_env()?;
//!     let spanish = Language::from_code("es")?;
//!     let result = provider.translate("Hello, world!", &spanish).await?;
//!     println!("{}", result); // "¡Hola, mundo!"
//!     Ok(())
//! }
//! ```

use crate::error::MtResult;
use async_trait::async_trait;
use polyglot_i18n::Language;

/// Generic trait for machine translation providers
///
/// Implementations must be safe to call concurrently: the run engine issues
/// many calls at once across leaves and languages. Providers do not retry;
/// a failed call fails the language it belongs to.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate one English string into `target`
    ///
    /// Prompt-based providers use `target.name()` ("Spanish"), code-based
    /// APIs use `target.code()` ("es").
    async fn translate(&self, text: &str, target: &Language) -> MtResult<String>;

    /// Used for logging to identify which provider handled a run
    fn provider_name(&self) -> &str;
}
