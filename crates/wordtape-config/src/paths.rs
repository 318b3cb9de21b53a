use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_cache() -> PathBuf {
    PathBuf::from("cache.json")
}

fn default_template() -> PathBuf {
    PathBuf::from("Templates/template.txt")
}

fn default_output() -> PathBuf {
    PathBuf::from("toPrint.txt")
}

fn default_credentials() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token() -> PathBuf {
    PathBuf::from("token.json")
}

/// Files the app reads and writes
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    /// Resolved terms from earlier runs
    #[serde(default = "default_cache")]
    pub cache: PathBuf,
    /// Print template
    #[serde(default = "default_template")]
    pub template: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// OAuth client secrets for the spreadsheet API
    #[serde(default = "default_credentials")]
    pub credentials: PathBuf,
    /// Cached OAuth token
    #[serde(default = "default_token")]
    pub token: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache: default_cache(),
            template: default_template(),
            output: default_output(),
            credentials: default_credentials(),
            token: default_token(),
        }
    }
}
