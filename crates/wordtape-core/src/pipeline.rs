use wordtape_types::{EnrichedRecord, Progress};

use crate::cache::CacheStore;
use crate::error::CoreError;
use crate::resolver::TermResolver;
use crate::source::TermSource;

/// Batch driver: acquire, filter through the cache, resolve, persist.
///
/// Terms are resolved one at a time in list order, so there is never more
/// than one lookup request in flight.
pub struct EnrichmentPipeline {
    resolver: TermResolver,
    cache: CacheStore,
}

impl EnrichmentPipeline {
    pub fn new(resolver: TermResolver, cache: CacheStore) -> Self {
        Self { resolver, cache }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Run a whole batch and return the records resolved in this run.
    ///
    /// Cached terms are filtered out up front and are not part of the
    /// result. `on_progress` is called after every resolved term.
    pub async fn enrich<S, F>(
        &self,
        source: &S,
        on_progress: F,
    ) -> Result<Vec<EnrichedRecord>, CoreError>
    where
        S: TermSource + ?Sized,
        F: FnMut(Progress),
    {
        let raw_terms = source.acquire().await.map_err(CoreError::Source)?;
        tracing::info!("Acquired {} terms from {}", raw_terms.len(), source.name());

        let raw_terms: Vec<String> = raw_terms
            .into_iter()
            .filter(|term| !term.trim().is_empty())
            .collect();

        let pending = self.cache.filter_unknown(raw_terms);
        let records = self.resolve_all(&pending, on_progress).await;

        self.cache.merge_and_persist(&records)?;

        Ok(records)
    }

    /// Resolve `terms` sequentially, reporting progress after each one
    pub async fn resolve_all<F>(
        &self,
        terms: &[String],
        mut on_progress: F,
    ) -> Vec<EnrichedRecord>
    where
        F: FnMut(Progress),
    {
        let total = terms.len();
        let mut records = Vec::with_capacity(total);

        for (index, term) in terms.iter().enumerate() {
            records.push(self.resolver.resolve(term).await);
            on_progress(Progress::new(index + 1, total));
        }

        records
    }
}
