//! Supported target languages
//!
//! The catalog is fixed and ordered. The first [`MAX_FEATURED_LANGUAGES`]
//! entries are the ones offered up front; the rest are shown on request.

use crate::error::LanguageError;
use serde::Serialize;

/// A target language: short code plus human-readable name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    code: &'static str,
    name: &'static str,
}

/// Number of catalog entries offered before "show more"
pub const MAX_FEATURED_LANGUAGES: usize = 6;

const CATALOG: &[Language] = &[
    Language::new("es", "Spanish"),
    Language::new("it", "Italian"),
    Language::new("de", "German"),
    Language::new("pl", "Polish"),
    Language::new("fr", "French"),
    Language::new("pt", "Portuguese"),
    Language::new("nl", "Dutch"),
    Language::new("sv", "Swedish"),
    Language::new("da", "Danish"),
    Language::new("fi", "Finnish"),
    Language::new("no", "Norwegian"),
    Language::new("cs", "Czech"),
    Language::new("ro", "Romanian"),
    Language::new("hu", "Hungarian"),
    Language::new("el", "Greek"),
    Language::new("tr", "Turkish"),
    Language::new("ru", "Russian"),
    Language::new("uk", "Ukrainian"),
    Language::new("ar", "Arabic"),
    Language::new("he", "Hebrew"),
    Language::new("hi", "Hindi"),
    Language::new("ja", "Japanese"),
    Language::new("ko", "Korean"),
    Language::new("zh", "Chinese"),
];

impl Language {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Language { code, name }
    }

    /// Look up a catalog language by code (case-insensitive)
    pub fn from_code(code: &str) -> Result<Language, LanguageError> {
        CATALOG
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code.trim()))
            .copied()
            .ok_or_else(|| LanguageError::UnknownCode(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Display name, e.g. "Spanish"
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The full ordered catalog
pub fn catalog() -> &'static [Language] {
    CATALOG
}

pub fn featured() -> &'static [Language] {
    &CATALOG[..MAX_FEATURED_LANGUAGES.min(CATALOG.len())]
}

/// Resolve a user selection of codes, dropping repeats and keeping the order
/// in which codes were first given.
pub fn resolve_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Language>, LanguageError> {
    let mut selected: Vec<Language> = Vec::with_capacity(codes.len());
    for code in codes {
        let language = Language::from_code(code.as_ref())?;
        if !selected.contains(&language) {
            selected.push(language);
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_starts_with_featured_core() {
        let codes: Vec<_> = catalog().iter().take(4).map(Language::code).collect();
        assert_eq!(codes, vec!["es", "it", "de", "pl"]);
    }

    #[test]
    fn test_catalog_codes_are_unique() {
        let codes: HashSet<_> = catalog().iter().map(Language::code).collect();
        assert_eq!(codes.len(), catalog().len());
    }

    #[test]
    fn test_from_code() {
        let es = Language::from_code("es").unwrap();
        assert_eq!(es.name(), "Spanish");
        assert_eq!(Language::from_code("FR").unwrap().name(), "French");
        assert_eq!(
            Language::from_code("xx"),
            Err(LanguageError::UnknownCode("xx".to_string()))
        );
    }

    #[test]
    fn test_featured_is_catalog_prefix() {
        assert_eq!(featured().len(), MAX_FEATURED_LANGUAGES);
        assert_eq!(featured(), &catalog()[..MAX_FEATURED_LANGUAGES]);
    }

    #[test]
    fn test_resolve_codes_dedups_and_keeps_order() {
        let langs = resolve_codes(&["fr", "es", "fr"]).unwrap();
        let codes: Vec<_> = langs.iter().map(Language::code).collect();
        assert_eq!(codes, vec!["fr", "es"]);
    }

    #[test]
    fn test_resolve_codes_rejects_unknown() {
        assert!(resolve_codes(&["es", "klingon"]).is_err());
    }
}
