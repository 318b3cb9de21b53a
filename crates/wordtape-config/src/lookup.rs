use serde::{Deserialize, Serialize};

fn default_primary_url() -> String {
    "http://wooordhunt.ru".to_string()
}

fn default_fallback_url() -> String {
    "https://context.reverso.net".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) wordtape/0.1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    /// Dictionary site queried first for pronunciation and translation
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    /// Translation site queried when the dictionary has no translation
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            fallback_url: default_fallback_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
