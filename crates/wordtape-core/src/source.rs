use async_trait::async_trait;

use crate::error::SourceError;

/// Producer of the raw term list a pipeline run works on
#[async_trait]
pub trait TermSource: Send + Sync {
    /// Ordered raw terms. An absent list is an empty one.
    async fn acquire(&self) -> Result<Vec<String>, SourceError>;

    /// Human-readable name for logs
    fn name(&self) -> &str;
}

/// In-memory list, mostly for tests and piping terms in directly
#[async_trait]
impl TermSource for Vec<String> {
    async fn acquire(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.clone())
    }

    fn name(&self) -> &str {
        "list"
    }
}
