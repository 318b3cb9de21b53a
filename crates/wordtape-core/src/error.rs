use std::path::PathBuf;

/// Boxed error coming out of a term source implementation
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Failed to acquire terms: {0}")]
    Source(SourceError),

    #[error("Failed to serialize cache: {0}")]
    CacheSerialize(#[from] serde_json::Error),

    #[error("Failed to write cache {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
