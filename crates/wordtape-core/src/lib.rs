pub mod cache;
pub mod error;
pub mod pipeline;
pub mod preprocess;
pub mod resolver;
pub mod source;

pub use cache::CacheStore;
pub use error::CoreError;
pub use pipeline::EnrichmentPipeline;
pub use resolver::TermResolver;
pub use source::TermSource;
