/// Error types for the core localization crate
use thiserror::Error;

/// Failure to read a localization file into a [`crate::Document`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Failed to read file '{path}': {message}")]
    Io { path: String, message: String },
    /// The file extension is neither `.properties` nor `.json`
    #[error("Unsupported file type. Please select a .properties or .json file.")]
    UnsupportedFileType(String),
    /// The raw text is not valid JSON
    #[error("Failed to parse JSON: {0}")]
    InvalidJson(String),
    /// The JSON root is a scalar
    #[error("Invalid JSON: root must be an object or array")]
    InvalidRoot,
    /// A `.properties` line could not be decoded
    #[error("Invalid properties file at line {line}: {message}")]
    InvalidProperties { line: usize, message: String },
}

/// Reasons a file naming pattern is rejected, in the order they are checked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error(
        "Naming pattern must include at least one of {{languageCode}}, {{lang}} or {{Lang}} \
         so that every language gets its own file"
    )]
    MissingLanguagePlaceholder,
    #[error("Naming pattern must not end with '{0}'")]
    ForbiddenEnding(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("Unknown language code: '{0}'")]
    UnknownCode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
    #[error("Hard limit ({hard_limit}) must not be lower than the warning threshold ({warning_threshold})")]
    LimitBelowWarning {
        warning_threshold: usize,
        hard_limit: usize,
    },
    #[error("Maximum concurrency must be at least 1")]
    ZeroConcurrency,
    #[error(transparent)]
    DefaultPattern(#[from] NamingError),
}
