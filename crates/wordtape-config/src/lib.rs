use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::lookup::LookupConfig;
use self::paths::PathsConfig;
use self::sheets::SheetsConfig;

pub mod lookup;
pub mod paths;
pub mod sheets;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub lookup: LookupConfig,
    pub sheets: SheetsConfig,

    /// Render cached records together with the ones resolved in this run
    pub render_full_list: bool,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override paths and timeouts from `WORDTAPE_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(path) = env::var("WORDTAPE_CACHE_PATH") {
            self.paths.cache = PathBuf::from(path);
        }
        if let Ok(path) = env::var("WORDTAPE_OUTPUT_PATH") {
            self.paths.output = PathBuf::from(path);
        }
        if let Ok(path) = env::var("WORDTAPE_TEMPLATE_PATH") {
            self.paths.template = PathBuf::from(path);
        }

        if let Some(timeout) = env::var("WORDTAPE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.lookup.timeout_seconds = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.paths.cache, PathBuf::from("cache.json"));
        assert_eq!(config.sheets.range, "A:A");
        assert_eq!(config.lookup.timeout_seconds, 30);
        assert!(!config.render_full_list);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"lookup": {"primary_url": "http://localhost:9000"}}"#)
                .unwrap();
        assert_eq!(config.lookup.primary_url, "http://localhost:9000");
        assert_eq!(config.lookup.fallback_url, "https://context.reverso.net");
    }
}
