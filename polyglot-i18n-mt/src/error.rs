/// Error types for the Machine Translation crate
use polyglot_i18n::{DocumentError, NamingError, SizeCheck};
use thiserror::Error;

/// Failure of a single provider call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    /// Provider misconfiguration (missing key, rejected credentials)
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// The request never got a usable HTTP response
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The provider answered with an error or an unusable body
    #[error("Translation error: {0}")]
    TranslationError(String),
}

impl From<reqwest::Error> for MtError {
    /// The request URL is dropped from the message so that credentials
    /// carried in it never reach logs or API responses.
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.without_url().to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;

/// Terminal failure of a translation run
#[derive(Debug, Error)]
pub enum RunError {
    /// Invalid naming pattern, or nothing to translate
    #[error("{0}")]
    Validation(String),
    /// Total units over the hard limit; no provider call was made
    #[error("{message} ({total_units} units, limit {hard_limit})")]
    SizeLimit {
        message: &'static str,
        total_units: usize,
        hard_limit: usize,
    },
    #[error(transparent)]
    Parse(#[from] DocumentError),
    /// A provider call failed; carries the provider's message
    #[error("{source}")]
    Provider { language: String, source: MtError },
    /// The archive sink could not store the output
    #[error("Failed to write translated files: {0}")]
    Archive(#[from] std::io::Error),
}

impl From<NamingError> for RunError {
    fn from(err: NamingError) -> Self {
        RunError::Validation(err.to_string())
    }
}

impl RunError {
    pub(crate) fn size_limit(total_units: usize, hard_limit: usize) -> Self {
        RunError::SizeLimit {
            message: SizeCheck::TooLarge.message().unwrap_or_default(),
            total_units,
            hard_limit,
        }
    }
}
