use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// An English term with its pronunciation and Russian translation.
///
/// `english` is the natural key and is never empty once a record reaches
/// the cache or the output. Empty `spell` / `russian` means the lookup
/// found nothing for that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub english: String,
    #[serde(default)]
    pub spell: String,
    #[serde(default)]
    pub russian: String,
}

impl EnrichedRecord {
    pub fn new(
        english: impl Into<String>,
        spell: impl Into<String>,
        russian: impl Into<String>,
    ) -> Self {
        Self {
            english: english.into(),
            spell: spell.into(),
            russian: russian.into(),
        }
    }

    /// Record that carries only the term, both lookups came back empty
    pub fn unresolved(english: impl Into<String>) -> Self {
        Self::new(english, "", "")
    }
}

/// A pre-translated pair taken from a chat export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatNote {
    pub english: String,
    pub russian: String,
}

impl From<ChatNote> for EnrichedRecord {
    fn from(note: ChatNote) -> Self {
        EnrichedRecord {
            english: note.english,
            spell: String::new(),
            russian: note.russian,
        }
    }
}

/// Resolve loop position after a term has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(done: usize, total: usize) -> Self {
        Self { done, total }
    }

    /// Whole percentage, truncated. An empty batch counts as finished.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let done = self.done.min(self.total);
        ((done * 100) / self.total) as u8
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Progress(Progress),
    /// Records were persisted to the cache
    CacheUpdated { added: usize },
    Rendered { output: PathBuf, rows: usize },
    Failed(String),
    Finished,
}
