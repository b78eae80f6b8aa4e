//! Machine translation runs for polyglot-i18n
//!
//! This crate takes a parsed localization [`Document`](polyglot_i18n::Document)
//! and translates it into many languages at once through a
//! [`MachineTranslator`] provider, producing one output file per language.
//!
//! # Workflow Example
//!
//! ```ignore
//! use polyglot_i18n::{EngineConfig, NamingPattern, load_document_from_file, resolve_codes};
//! use polyglot_i18n_mt::{DirectorySink, OpenAiProvider, RunCoordinator, TranslationJob};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Load the source file
//!     let document = load_document_from_file("messages.json".as_ref())?;
//!
//!     // 2. Describe the run
//!     let job = TranslationJob::new(
//!         document,
//!         resolve_codes(&["es", "de"])?,
//!         NamingPattern::parse("{originalFileName}_{languageCode}")?,
//!         "messages.json",
//!     );
//!
//!     // 3. Translate every language concurrently
//!     let coordinator = RunCoordinator::new(Arc::new(OpenAiProvider::from_env()?), EngineConfig::from_env()?);
//!     let report = coordinator.submit(job, &DirectorySink::new("out")).await?;
//!
//!     // out/messages_es.json, out/messages_de.json
//!     println!("{:?}", report.map(|r| r.bundle.len()));
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod openai;
pub mod translator;


// Re-export main types for convenient access
pub use archive::{ArchiveSink, Bundle, DirectorySink, MemorySink, OutputFile};
pub use coordinator::{RunCoordinator, RunReport, RunState, TranslationJob};
pub use dispatcher::dispatch_language;
pub use error::{MtError, MtResult, RunError};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use openai::OpenAiProvider;
pub use translator::MachineTranslator;
