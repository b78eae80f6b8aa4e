//! Per-language translation dispatch
//!
//! One dispatch translates a whole document into one language: every string
//! leaf becomes one provider call, all calls are started together, and the
//! language either succeeds with a complete document or fails with the first
//! provider error.

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use polyglot_i18n::{Document, Language, translate_leaves};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Translate `document` into `language`.
///
/// `limiter` bounds how many provider calls are in flight; pass the same
/// semaphore to every language of a run to cap the run as a whole.
/// `on_leaf_complete` runs once per successfully translated leaf, before
/// this function returns.
pub async fn dispatch_language<F>(
    document: &Document,
    language: Language,
    translator: &dyn MachineTranslator,
    limiter: &Semaphore,
    on_leaf_complete: F,
) -> MtResult<Document>
where
    F: Fn() + Sync,
{
    info!(
        "Translating into {} ({}) with {}",
        language.name(),
        language.code(),
        translator.provider_name()
    );

    let on_leaf_complete = &on_leaf_complete;
    let root = translate_leaves(document.root(), language, |text, target| async move {
        let _permit = limiter
            .acquire()
            .await
            .map_err(|_| MtError::TranslationError("Translation run was shut down".to_string()))?;
        let translated = translator.translate(&text, &target).await?;
        debug!("[{}] {:?} -> {:?}", target.code(), text, translated);
        on_leaf_complete();
        Ok::<_, MtError>(translated)
    })
    .await;

    match root {
        Ok(root) => {
            info!("Finished {} ({})", language.name(), language.code());
            Ok(document.with_root(root))
        }
        Err(err) => {
            warn!("Translation into {} failed: {}", language.name(), err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockTranslator};
    use polyglot_i18n::{DocumentFormat, Node, parse};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn lang(code: &str) -> Language {
        Language::from_code(code).unwrap()
    }

    fn nested() -> Document {
        parse(
            r#"{"a": "hello", "b": {"c": "world", "n": 2}, "l": ["x", true]}"#,
            DocumentFormat::Json,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_nested_document() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let limiter = Semaphore::new(4);
        let completed = AtomicUsize::new(0);

        let doc = nested();
        let result = dispatch_language(&doc, lang("es"), &mock, &limiter, || {
            completed.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

        assert_eq!(
            result.root(),
            &Node::from(json!({"a": "hello_es", "b": {"c": "world_es", "n": 2}, "l": ["x_es", true]}))
        );
        assert_eq!(result.format(), DocumentFormat::Json);
        assert_eq!(completed.load(Ordering::SeqCst), 3);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_flat_document() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let limiter = Semaphore::new(4);
        let doc = Document::flat([("greeting", "Hello"), ("farewell", "Bye")]);

        let result = dispatch_language(&doc, lang("pl"), &mock, &limiter, || {})
            .await
            .unwrap();
        assert_eq!(
            result.entries().collect::<Vec<_>>(),
            vec![("greeting", "Hello_pl"), ("farewell", "Bye_pl")]
        );
        assert_eq!(result.format(), DocumentFormat::Flat);
    }

    #[tokio::test]
    async fn test_dispatch_fails_whole_language() {
        let mock = MockTranslator::new(MockMode::FailText {
            text: "world".to_string(),
            message: "rate limited".to_string(),
        });
        let limiter = Semaphore::new(4);
        let doc = nested();

        let err = dispatch_language(&doc, lang("de"), &mock, &limiter, || {})
            .await
            .unwrap_err();
        assert_eq!(err, MtError::TranslationError("rate limited".to_string()));
    }

    #[tokio::test]
    async fn test_dispatch_respects_limiter() {
        let mock = MockTranslator::with_delay(MockMode::Suffix, 10);
        let limiter = Semaphore::new(2);
        let doc = Document::flat((0..10).map(|i| (format!("k{}", i), format!("v{}", i))));

        dispatch_language(&doc, lang("it"), &mock, &limiter, || {})
            .await
            .unwrap();
        assert_eq!(mock.call_count(), 10);
        assert!(mock.max_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_closed_limiter_fails() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let limiter = Semaphore::new(1);
        limiter.close();
        let doc = Document::flat([("a", "b")]);

        let result = dispatch_language(&doc, lang("es"), &mock, &limiter, || {}).await;
        assert!(result.is_err());
        assert_eq!(mock.call_count(), 0);
    }
}
