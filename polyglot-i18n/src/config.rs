//! Engine configuration: size limits, concurrency and default naming

use crate::error::ConfigError;
use crate::naming::{self, DEFAULT_NAMING_PATTERN};
use serde::Serialize;
use std::str::FromStr;

pub const DEFAULT_WARNING_THRESHOLD: usize = 250;
pub const DEFAULT_HARD_LIMIT: usize = 1000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

pub const TOO_LARGE_MESSAGE: &str =
    "Request too large. Consider breaking down the content into smaller parts.";
pub const SLOW_WARNING_MESSAGE: &str =
    "Service may be slow and may fail. Consider breaking down the content into smaller parts.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Above this many units a run still proceeds, with an advisory
    pub warning_threshold: usize,
    /// Above this many units a run is refused before any provider call
    pub hard_limit: usize,
    /// Provider calls allowed in flight at once, across all languages
    pub max_concurrency: usize,
    pub default_naming_pattern: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            hard_limit: DEFAULT_HARD_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            default_naming_pattern: DEFAULT_NAMING_PATTERN.to_string(),
        }
    }
}

impl EngineConfig {
    /// Read overrides from `POLYGLOT_KEYS_WARNING`, `POLYGLOT_KEYS_LIMIT`,
    /// `POLYGLOT_MAX_CONCURRENCY` and `POLYGLOT_NAMING_PATTERN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            warning_threshold: parse_var(&lookup, "POLYGLOT_KEYS_WARNING", defaults.warning_threshold)?,
            hard_limit: parse_var(&lookup, "POLYGLOT_KEYS_LIMIT", defaults.hard_limit)?,
            max_concurrency: parse_var(&lookup, "POLYGLOT_MAX_CONCURRENCY", defaults.max_concurrency)?,
            default_naming_pattern: lookup("POLYGLOT_NAMING_PATTERN")
                .unwrap_or(defaults.default_naming_pattern),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hard_limit < self.warning_threshold {
            return Err(ConfigError::LimitBelowWarning {
                warning_threshold: self.warning_threshold,
                hard_limit: self.hard_limit,
            });
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        naming::validate(&self.default_naming_pattern)?;
        Ok(())
    }

    pub fn check_size(&self, total_units: usize) -> SizeCheck {
        if total_units > self.hard_limit {
            SizeCheck::TooLarge
        } else if total_units > self.warning_threshold {
            SizeCheck::Warning
        } else {
            SizeCheck::Ok
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

/// Outcome of comparing a run's total units against the configured limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCheck {
    Ok,
    Warning,
    TooLarge,
}

impl SizeCheck {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SizeCheck::Ok => None,
            SizeCheck::Warning => Some(SLOW_WARNING_MESSAGE),
            SizeCheck::TooLarge => Some(TOO_LARGE_MESSAGE),
        }
    }
}
