//! Lookup source interfaces.
//!
//! A lookup never fails at its boundary: every network or scraping error
//! is logged and turned into [`Lookup::Empty`], so callers only ever see
//! "found something" or "found nothing".

/// Outcome of a single field lookup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lookup<T> {
    Found(T),
    #[default]
    Empty,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Empty => None,
        }
    }
}

impl Lookup<String> {
    /// Empty strings count as nothing found
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Lookup::Empty
        } else {
            Lookup::Found(text)
        }
    }

    /// Collapse an extraction result, logging the reason on failure
    pub fn degrade(result: Result<String, LookupError>, source: &str, term: &str) -> Self {
        match result {
            Ok(text) => Lookup::from_text(text),
            Err(e) => {
                tracing::debug!("{source} lookup for '{term}' degraded: {e}");
                Lookup::Empty
            }
        }
    }

    pub fn into_text(self) -> String {
        self.into_option().unwrap_or_default()
    }
}

/// Fields scraped from the primary dictionary page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrimaryEntry {
    pub spell: Lookup<String>,
    pub translation: Lookup<String>,
}

impl PrimaryEntry {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Source queried first: pronunciation and translation
#[async_trait::async_trait]
pub trait PrimarySource: Send + Sync {
    async fn resolve_primary(&self, term: &str) -> PrimaryEntry;

    fn metadata(&self) -> ProviderMetadata;
}

/// Source queried when the primary one has no translation
#[async_trait::async_trait]
pub trait FallbackSource: Send + Sync {
    async fn resolve_fallback(&self, term: &str) -> Lookup<String>;

    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Element not found: {0}")]
    ElementMissing(&'static str),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_treats_empty_as_nothing() {
        assert_eq!(Lookup::from_text(""), Lookup::Empty);
        assert_eq!(Lookup::from_text("кот"), Lookup::Found("кот".to_string()));
    }

    #[test]
    fn test_degrade_swallows_errors() {
        let result = Lookup::degrade(Err(LookupError::Status(404)), "test", "cat");
        assert_eq!(result, Lookup::Empty);
        assert_eq!(result.into_text(), "");
    }

    #[test]
    fn test_degrade_keeps_text() {
        let result = Lookup::degrade(Ok("собака".to_string()), "test", "dog");
        assert!(result.is_found());
        assert_eq!(result.into_text(), "собака");
    }
}
