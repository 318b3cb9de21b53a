//! Persistent store of resolved terms.
//!
//! The cache is a pretty-printed JSON array of [`EnrichedRecord`]s. It only
//! grows: a run reads it once to drop known terms from the work list, then
//! reads it again and rewrites it with the new records appended.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use wordtape_types::EnrichedRecord;

use crate::error::CoreError;

#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cache contents: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absent file is an empty cache, anything else unreadable is an error
    fn read(&self) -> Result<Vec<EnrichedRecord>, ReadError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Every cached record, empty when the cache can't be read
    pub fn load_all(&self) -> Vec<EnrichedRecord> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!("Ignoring cache {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    /// Terms whose value is not the `english` of any cached record.
    ///
    /// Order is kept and duplicates inside `raw_terms` are not collapsed.
    /// A missing or corrupt cache passes `raw_terms` through untouched.
    pub fn filter_unknown(&self, raw_terms: Vec<String>) -> Vec<String> {
        let cached = match self.read() {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!(
                    "Cache {} unreadable, nothing filtered: {}",
                    self.path.display(),
                    e
                );
                return raw_terms;
            }
        };

        let known: HashSet<&str> = cached.iter().map(|r| r.english.as_str()).collect();
        let before = raw_terms.len();
        let unknown: Vec<String> = raw_terms
            .into_iter()
            .filter(|term| !known.contains(term.as_str()))
            .collect();

        tracing::info!(
            "Cache hit for {} of {} terms",
            before - unknown.len(),
            before
        );
        unknown
    }

    /// Append `new_records` to the cached ones and rewrite the whole file.
    ///
    /// Nothing is deduplicated here. A corrupt cache is moved aside to
    /// `<name>.corrupt` and replaced by the new records alone.
    pub fn merge_and_persist(&self, new_records: &[EnrichedRecord]) -> Result<(), CoreError> {
        let mut records = match self.read() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Cache {} unreadable, starting over: {}", self.path.display(), e);
                self.set_aside_corrupt();
                Vec::new()
            }
        };

        records.extend_from_slice(new_records);
        let json = serde_json::to_string_pretty(&records)?;
        self.replace_file(&json)?;

        tracing::info!(
            "Cache {} now holds {} records ({} new)",
            self.path.display(),
            records.len(),
            new_records.len()
        );
        Ok(())
    }

    fn set_aside_corrupt(&self) {
        let mut aside = self.path.clone().into_os_string();
        aside.push(".corrupt");

        if let Err(e) = fs::rename(&self.path, &aside) {
            tracing::warn!("Could not move corrupt cache aside: {}", e);
        }
    }

    /// Write next to the target, then rename over it
    fn replace_file(&self, contents: &str) -> Result<(), CoreError> {
        let write_err = |source: std::io::Error| CoreError::CacheWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents).map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::warn!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(write_err(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_cache_filters_nothing() {
        let dir = tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));

        let raw = terms(&["cat", "dog"]);
        assert_eq!(cache.filter_unknown(raw.clone()), raw);
        assert!(cache.load_all().is_empty());
    }

    #[test]
    fn test_corrupt_cache_filters_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();
        let cache = CacheStore::new(&path);

        let raw = terms(&["cat", "cat", "dog"]);
        assert_eq!(cache.filter_unknown(raw.clone()), raw);
    }

    #[test]
    fn test_filter_keeps_order_and_duplicates() {
        let dir = tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));
        cache
            .merge_and_persist(&[EnrichedRecord::new("cat", "kæt", "кот")])
            .unwrap();

        let raw = terms(&["owl", "cat", "bee", "owl"]);
        assert_eq!(cache.filter_unknown(raw), terms(&["owl", "bee", "owl"]));
    }

    #[test]
    fn test_filter_compares_raw_value() {
        let dir = tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));
        cache
            .merge_and_persist(&[EnrichedRecord::unresolved("cat")])
            .unwrap();

        assert_eq!(cache.filter_unknown(terms(&["Cat"])), terms(&["Cat"]));
    }

    #[test]
    fn test_merge_appends_after_existing() {
        let dir = tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));
        let cat = EnrichedRecord::new("cat", "kæt", "кот");
        let dog = EnrichedRecord::new("dog", "dɔɡ", "собака");

        cache.merge_and_persist(&[cat.clone()]).unwrap();
        cache.merge_and_persist(&[dog.clone()]).unwrap();

        assert_eq!(cache.load_all(), vec![cat, dog]);
    }

    #[test]
    fn test_merge_does_not_dedup() {
        let dir = tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));
        let cat = EnrichedRecord::unresolved("cat");

        cache.merge_and_persist(&[cat.clone()]).unwrap();
        cache.merge_and_persist(&[cat.clone()]).unwrap();

        assert_eq!(cache.load_all(), vec![cat.clone(), cat]);
    }

    #[test]
    fn test_merge_over_corrupt_cache_writes_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "garbage").unwrap();
        let cache = CacheStore::new(&path);
        let dog = EnrichedRecord::new("dog", "dɔɡ", "собака");

        cache.merge_and_persist(&[dog.clone()]).unwrap();

        assert_eq!(cache.load_all(), vec![dog]);
        let aside = fs::read_to_string(dir.path().join("cache.json.corrupt")).unwrap();
        assert_eq!(aside, "garbage");
    }

    #[test]
    fn test_persisted_format_is_field_named() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");
        let cache = CacheStore::new(&path);

        cache
            .merge_and_persist(&[EnrichedRecord::new("cat", "kæt", "кот")])
            .unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"english\": \"cat\""));
        assert!(json.contains("\"spell\": \"kæt\""));
        assert!(json.contains("\"russian\": \"кот\""));
        assert!(!dir.path().join("nested").join("cache.json.tmp").exists());
    }

    #[test]
    fn test_write_failure_propagates() {
        let dir = tempdir().unwrap();
        // Parent of the cache is a regular file
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let cache = CacheStore::new(blocker.join("cache.json"));

        let result = cache.merge_and_persist(&[EnrichedRecord::unresolved("cat")]);
        assert!(matches!(result, Err(CoreError::CacheWrite { .. })));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // Renaming a file over a non-empty directory fails
        let path = dir.path().join("cache.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let cache = CacheStore::new(path);

        let result = cache.replace_file("[]");
        assert!(matches!(result, Err(CoreError::CacheWrite { .. })));
        assert!(!dir.path().join("cache.json.tmp").exists());
    }
}
