//! Output file naming patterns
//!
//! A pattern such as `{originalFileName}_{languageCode}` decides the name of
//! each translated file. Supported placeholders:
//!
//! | Placeholder          | Replaced with                          |
//! |----------------------|----------------------------------------|
//! | `{originalFileName}` | source file name without its extension |
//! | `{languageCode}`     | language code, e.g. `es`               |
//! | `{lang}`             | language name in lower case, `spanish` |
//! | `{Lang}`             | language name as-is, `Spanish`         |
//!
//! The source file's extension is always appended to the expanded pattern.

use crate::error::NamingError;
use crate::language::Language;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

pub const DEFAULT_NAMING_PATTERN: &str = "{originalFileName}_{languageCode}";

const LANGUAGE_PLACEHOLDERS: [&str; 3] = ["{languageCode}", "{lang}", "{Lang}"];

/// Characters a pattern may not end with
pub const FORBIDDEN_ENDINGS: [char; 16] = [
    '.', ',', '-', '?', '!', '\'', '"', '(', ')', '{', '[', ']', ':', ';', '<', '>',
];

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(originalFileName|languageCode|lang|Lang)\}").expect("placeholder regex")
});

/// Check a pattern. Rules are applied in order and the first failure wins:
///
/// 1. at least one language placeholder, otherwise every language would
///    produce the same file name;
/// 2. no trailing character from [`FORBIDDEN_ENDINGS`].
///
/// Surrounding whitespace is ignored.
pub fn validate(pattern: &str) -> Result<(), NamingError> {
    let pattern = pattern.trim();
    if !LANGUAGE_PLACEHOLDERS.iter().any(|p| pattern.contains(p)) {
        return Err(NamingError::MissingLanguagePlaceholder);
    }
    match pattern.chars().last() {
        Some(c) if FORBIDDEN_ENDINGS.contains(&c) => Err(NamingError::ForbiddenEnding(c)),
        _ => Ok(()),
    }
}

/// Split `messages.en.json` into (`messages.en`, `Some("json")`).
/// A name without a dot has no extension.
pub fn split_file_name(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((base, extension)) => (base, Some(extension)),
        None => (file_name, None),
    }
}

/// A naming pattern that passed [`validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPattern(String);

impl NamingPattern {
    pub fn parse(pattern: &str) -> Result<Self, NamingError> {
        validate(pattern)?;
        Ok(NamingPattern(pattern.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand the pattern for one language.
    ///
    /// Every occurrence of a placeholder is replaced, the result is trimmed
    /// and the source extension is appended.
    pub fn expand(&self, original_file_name: &str, language: &Language) -> String {
        let (base, extension) = split_file_name(original_file_name);
        let body = PLACEHOLDER.replace_all(&self.0, |caps: &Captures| match &caps[1] {
            "originalFileName" => base.to_string(),
            "languageCode" => language.code().to_string(),
            "lang" => language.name().to_lowercase(),
            _ => language.name().to_string(),
        });
        let body = body.trim();
        match extension {
            Some(extension) => format!("{}.{}", body, extension),
            None => body.to_string(),
        }
    }
}

impl Default for NamingPattern {
    fn default() -> Self {
        NamingPattern(DEFAULT_NAMING_PATTERN.to_string())
    }
}

impl fmt::Display for NamingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
