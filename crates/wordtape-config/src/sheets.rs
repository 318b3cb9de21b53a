use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".to_string()
}

fn default_range() -> String {
    "A:A".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_redirect_uri() -> String {
    "http://localhost".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SheetsConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Column range holding the English terms
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            range: default_range(),
            token_url: default_token_url(),
            auth_url: default_auth_url(),
            redirect_uri: default_redirect_uri(),
        }
    }
}
