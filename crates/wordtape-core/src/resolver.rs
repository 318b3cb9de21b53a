use std::sync::Arc;

use wordtape_translator::{FallbackSource, PrimarySource};
use wordtape_types::EnrichedRecord;

/// Primary-then-fallback lookup for a single term
#[derive(Clone)]
pub struct TermResolver {
    primary: Arc<dyn PrimarySource>,
    fallback: Arc<dyn FallbackSource>,
}

impl TermResolver {
    pub fn new(primary: Arc<dyn PrimarySource>, fallback: Arc<dyn FallbackSource>) -> Self {
        Self { primary, fallback }
    }

    /// Always yields a record; lookups that found nothing leave fields empty.
    /// The fallback is only asked when the primary has no translation.
    pub async fn resolve(&self, term: &str) -> EnrichedRecord {
        let entry = self.primary.resolve_primary(term).await;
        let spell = entry.spell.into_text();

        let russian = if entry.translation.is_found() {
            entry.translation.into_text()
        } else {
            tracing::debug!(
                "No {} translation for '{}', asking {}",
                self.primary.metadata().name,
                term,
                self.fallback.metadata().name
            );
            self.fallback.resolve_fallback(term).await.into_text()
        };

        if russian.is_empty() {
            tracing::warn!("No translation found for '{}'", term);
        }

        EnrichedRecord {
            english: term.to_string(),
            spell,
            russian,
        }
    }
}
