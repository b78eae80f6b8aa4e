//! Core types for translating localization files into many languages.
//!
//! This crate knows nothing about translation providers or async runtimes.
//! It covers:
//!
//! - the [`Document`] model shared by `.properties` and JSON files,
//! - leaf counting and shape-preserving translation ([`traversal`]),
//! - output file naming ([`NamingPattern`]),
//! - the supported [`Language`] catalog,
//! - run progress ([`ProgressState`]) and size limits ([`EngineConfig`]).

pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod loader;
pub mod naming;
pub mod progress;
pub mod properties;
pub mod traversal;

// Re-export the main types for convenient access
pub use config::{EngineConfig, SizeCheck};
pub use document::{Document, DocumentFormat, Node};
pub use error::{ConfigError, DocumentError, LanguageError, NamingError};
pub use language::{Language, catalog, featured, resolve_codes};
pub use loader::{load_document_from_file, parse, serialize};
pub use naming::{DEFAULT_NAMING_PATTERN, NamingPattern};
pub use progress::{ProgressSnapshot, ProgressState};
pub use traversal::{count_leaves, leaves, map_leaves, translate_leaves};
