//! Run lifecycle: size checks, concurrent per-language dispatch, aggregation
//!
//! ```text
//! Idle → Validating → Dispatching → Aggregating → Completed
//!             │                          │
//!             └────────── Failed ◄───────┘
//! ```
//!
//! A run is all-or-nothing: if any language fails, the other languages are
//! still allowed to finish but nothing is written to the archive sink.

use crate::archive::{ArchiveSink, Bundle};
use crate::dispatcher::dispatch_language;
use crate::error::RunError;
use crate::translator::MachineTranslator;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use polyglot_i18n::{
    Document, DocumentFormat, EngineConfig, Language, NamingPattern, ProgressState, SizeCheck,
    count_leaves, parse, serialize,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Validating,
    Dispatching,
    Aggregating,
    Completed,
    Failed,
}

/// Everything needed for one run
#[derive(Debug, Clone)]
pub struct TranslationJob {
    pub document: Document,
    pub languages: Vec<Language>,
    pub naming_pattern: NamingPattern,
    pub original_file_name: String,
}

impl TranslationJob {
    pub fn new(
        document: Document,
        languages: Vec<Language>,
        naming_pattern: NamingPattern,
        original_file_name: impl Into<String>,
    ) -> Self {
        TranslationJob {
            document,
            languages,
            naming_pattern,
            original_file_name: original_file_name.into(),
        }
    }

    /// Parse raw file contents, picking the format from the file name
    pub fn from_source(
        raw: &str,
        original_file_name: &str,
        languages: Vec<Language>,
        naming_pattern: NamingPattern,
    ) -> Result<Self, RunError> {
        let format = DocumentFormat::from_file_name(original_file_name)?;
        let document = parse(raw, format)?;
        Ok(Self::new(document, languages, naming_pattern, original_file_name))
    }

    /// Counted leaves times selected languages
    pub fn total_units(&self) -> usize {
        count_leaves(self.document.root()) * self.languages.len()
    }

    /// A job with no content or no languages is not submitted at all
    pub fn is_submittable(&self) -> bool {
        !self.document.is_empty() && !self.languages.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub bundle: Bundle,
    pub total_units: usize,
    /// Set when the run was over the warning threshold
    pub advisory: Option<&'static str>,
}

pub struct RunCoordinator {
    translator: Arc<dyn MachineTranslator>,
    config: EngineConfig,
    progress: Arc<ProgressState>,
    state: Mutex<RunState>,
}

impl RunCoordinator {
    pub fn new(translator: Arc<dyn MachineTranslator>, config: EngineConfig) -> Self {
        RunCoordinator {
            translator,
            config,
            progress: Arc::new(ProgressState::default()),
            state: Mutex::new(RunState::Idle),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared progress of the current run, for display
    pub fn progress(&self) -> Arc<ProgressState> {
        Arc::clone(&self.progress)
    }

    pub fn state(&self) -> RunState {
        self.state.lock().map(|state| *state).unwrap_or(RunState::Failed)
    }

    /// Pre-flight size check, so callers can warn before submitting
    pub fn estimate(&self, job: &TranslationJob) -> (usize, SizeCheck) {
        let total_units = job.total_units();
        (total_units, self.config.check_size(total_units))
    }

    /// Run a job to completion and hand the bundle to `sink`.
    ///
    /// Returns `Ok(None)` without doing anything when the job has no content
    /// or no target languages.
    pub async fn submit(
        &self,
        job: TranslationJob,
        sink: &dyn ArchiveSink,
    ) -> Result<Option<RunReport>, RunError> {
        if !job.is_submittable() {
            debug!("Nothing to translate, ignoring submission");
            return Ok(None);
        }

        let result = self.run(job, sink).await;
        match &result {
            Ok(report) => {
                self.transition(RunState::Completed);
                info!("Run completed: {} files", report.bundle.len());
            }
            Err(err) => {
                self.transition(RunState::Failed);
                warn!("Run failed: {}", err);
            }
        }
        result.map(Some)
    }

    async fn run(&self, job: TranslationJob, sink: &dyn ArchiveSink) -> Result<RunReport, RunError> {
        self.progress.reset(0);
        self.transition(RunState::Validating);

        let (total_units, size) = self.estimate(&job);
        let advisory = match size {
            SizeCheck::TooLarge => {
                return Err(RunError::size_limit(total_units, self.config.hard_limit));
            }
            SizeCheck::Warning => {
                warn!("{} units: {}", total_units, size.message().unwrap_or_default());
                size.message()
            }
            SizeCheck::Ok => None,
        };

        info!(
            "Translating {} into {} languages ({} units) with {}",
            job.original_file_name,
            job.languages.len(),
            total_units,
            self.translator.provider_name()
        );

        self.progress.reset(total_units);
        self.transition(RunState::Dispatching);

        let limiter = Semaphore::new(self.config.max_concurrency);
        let limiter = &limiter;
        let progress = &*self.progress;
        let translator = &*self.translator;
        let document = &job.document;

        let mut pending: FuturesUnordered<_> = job
            .languages
            .iter()
            .copied()
            .enumerate()
            .map(|(index, language)| async move {
                let result = dispatch_language(document, language, translator, limiter, || {
                    progress.advance();
                })
                .await;
                (index, language, result)
            })
            .collect();

        let mut translated: Vec<Option<Document>> = vec![None; job.languages.len()];
        let mut first_error: Option<RunError> = None;
        while let Some((index, language, result)) = pending.next().await {
            match result {
                Ok(document) => translated[index] = Some(document),
                Err(source) => {
                    if first_error.is_none() {
                        first_error = Some(RunError::Provider {
                            language: language.code().to_string(),
                            source,
                        });
                    }
                }
            }
        }
        drop(pending);
        // Every language has settled
        self.transition(RunState::Aggregating);

        if let Some(err) = first_error {
            return Err(err);
        }

        let mut bundle = Bundle::default();
        for (language, document) in job.languages.iter().zip(translated.into_iter().flatten()) {
            let file_name = job
                .naming_pattern
                .expand(&job.original_file_name, language);
            bundle.push(file_name, serialize(&document));
        }

        sink.write(&bundle)?;

        Ok(RunReport {
            bundle,
            total_units,
            advisory,
        })
    }

    fn transition(&self, next: RunState) {
        if let Ok(mut state) = self.state.lock() {
            debug!("Run state {:?} -> {:?}", *state, next);
            *state = next;
        }
    }
}
