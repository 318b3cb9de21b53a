use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use wordtape_config::sheets::SheetsConfig;

use super::SheetsError;

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
/// Refresh a little before the server-side expiry
const EXPIRY_MARGIN_SECS: u64 = 60;

/// OAuth client from a Google Cloud `credentials.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
struct CredentialsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    pub fn load(path: &Path) -> Result<Self, SheetsError> {
        let file: CredentialsFile = read_json(path)?;
        file.installed
            .or(file.web)
            .ok_or_else(|| SheetsError::InvalidCredentials(path.to_path_buf()))
    }
}

/// Token cached between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds
    pub expires_at: u64,
}

impl StoredToken {
    pub fn is_expired(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    /// `None` when no token was cached yet
    pub fn load(path: &Path) -> Result<Option<Self>, SheetsError> {
        if !path.exists() {
            return Ok(None);
        }
        read_json(path).map(Some)
    }

    pub fn save(&self, path: &Path) -> Result<(), SheetsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SheetsError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SheetsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Credential file plus cached token, refreshed when it runs out
#[derive(Clone)]
pub struct SheetsAuth {
    credentials_path: PathBuf,
    token_path: PathBuf,
    config: SheetsConfig,
    client: reqwest::Client,
}

impl SheetsAuth {
    pub fn new(credentials_path: PathBuf, token_path: PathBuf, config: SheetsConfig) -> Self {
        Self {
            credentials_path,
            token_path,
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Valid access token, refreshing and re-saving it if needed
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let secrets = ClientSecrets::load(&self.credentials_path)?;

        let token = match StoredToken::load(&self.token_path)? {
            Some(token) => token,
            None => {
                return Err(SheetsError::AuthRequired {
                    url: self.consent_url(&secrets),
                });
            }
        };

        if !token.is_expired(unix_now()) {
            return Ok(token.access_token);
        }

        let Some(refresh_token) = token.refresh_token.clone() else {
            return Err(SheetsError::AuthRequired {
                url: self.consent_url(&secrets),
            });
        };

        tracing::info!("Refreshing spreadsheet access token");
        let params = [
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let mut refreshed = self.request_token(&params).await?;
        // Google only sends a refresh token on the first exchange
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token);
        }

        refreshed.save(&self.token_path)?;
        Ok(refreshed.access_token)
    }

    /// Trade a consent code for a token and cache it
    pub async fn exchange_code(&self, code: &str) -> Result<StoredToken, SheetsError> {
        let secrets = ClientSecrets::load(&self.credentials_path)?;
        let params = [
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let token = self.request_token(&params).await?;
        token.save(&self.token_path)?;
        tracing::info!("Token saved to {}", self.token_path.display());
        Ok(token)
    }

    pub fn consent_url(&self, secrets: &ClientSecrets) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            self.config.auth_url,
            urlencoding::encode(&secrets.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(SCOPE),
        )
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<StoredToken, SheetsError> {
        let response: TokenResponse = self
            .client
            .post(&self.config.token_url)
            .form(params)
            .send()
            .await?
            .json()
            .await?;

        token_from_response(response, unix_now())
    }
}

fn token_from_response(response: TokenResponse, now: u64) -> Result<StoredToken, SheetsError> {
    if let Some(error) = response.error {
        let detail = response.error_description.unwrap_or_default();
        return Err(SheetsError::ApiError(format!("token endpoint: {error} {detail}")));
    }

    let access_token = response
        .access_token
        .ok_or_else(|| SheetsError::ApiError("token endpoint returned no access token".into()))?;

    Ok(StoredToken {
        access_token,
        refresh_token: response.refresh_token,
        expires_at: now + response.expires_in.unwrap_or(3600),
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, SheetsError> {
    let data = fs::read_to_string(path).map_err(|source| SheetsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| SheetsError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CREDENTIALS: &str = r#"{"installed": {"client_id": "id.apps", "client_secret": "s3cret", "token_uri": "https://oauth2.googleapis.com/token"}}"#;

    fn auth_in(dir: &Path) -> SheetsAuth {
        fs::write(dir.join("credentials.json"), CREDENTIALS).unwrap();
        SheetsAuth::new(
            dir.join("credentials.json"),
            dir.join("token.json"),
            SheetsConfig::default(),
        )
    }

    #[test]
    fn test_loads_installed_and_web_secrets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        fs::write(&path, CREDENTIALS).unwrap();
        assert_eq!(ClientSecrets::load(&path).unwrap().client_id, "id.apps");

        fs::write(&path, r#"{"web": {"client_id": "w", "client_secret": "x"}}"#).unwrap();
        assert_eq!(ClientSecrets::load(&path).unwrap().client_id, "w");

        fs::write(&path, r#"{"other": {}}"#).unwrap();
        assert!(matches!(
            ClientSecrets::load(&path),
            Err(SheetsError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_expiry_margin() {
        let token = StoredToken {
            access_token: "a".into(),
            refresh_token: None,
            expires_at: 1_000,
        };
        assert!(!token.is_expired(900));
        assert!(token.is_expired(940));
        assert!(token.is_expired(2_000));
    }

    #[test]
    fn test_token_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.json");
        assert_eq!(StoredToken::load(&path).unwrap(), None);

        let token = StoredToken {
            access_token: "a".into(),
            refresh_token: Some("r".into()),
            expires_at: 42,
        };
        token.save(&path).unwrap();
        assert_eq!(StoredToken::load(&path).unwrap(), Some(token));
    }

    #[test]
    fn test_token_response_error() {
        let response = TokenResponse {
            access_token: None,
            expires_in: None,
            refresh_token: None,
            error: Some("invalid_grant".into()),
            error_description: Some("Bad Request".into()),
        };
        assert!(matches!(
            token_from_response(response, 0),
            Err(SheetsError::ApiError(_))
        ));
    }

    #[test]
    fn test_token_response_expiry() {
        let response = TokenResponse {
            access_token: Some("a".into()),
            expires_in: Some(3599),
            refresh_token: None,
            error: None,
            error_description: None,
        };
        assert_eq!(token_from_response(response, 100).unwrap().expires_at, 3699);
    }

    #[tokio::test]
    async fn test_missing_token_requires_consent() {
        let dir = tempdir().unwrap();
        let auth = auth_in(dir.path());

        match auth.access_token().await {
            Err(SheetsError::AuthRequired { url }) => {
                assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
                assert!(url.contains("client_id=id.apps"));
                assert!(url.contains("spreadsheets.readonly"));
            }
            other => panic!("expected AuthRequired, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fresh_token_is_used_as_is() {
        let dir = tempdir().unwrap();
        let auth = auth_in(dir.path());
        StoredToken {
            access_token: "live".into(),
            refresh_token: None,
            expires_at: unix_now() + 3600,
        }
        .save(&dir.path().join("token.json"))
        .unwrap();

        assert_eq!(auth.access_token().await.unwrap(), "live");
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_requires_consent() {
        let dir = tempdir().unwrap();
        let auth = auth_in(dir.path());
        StoredToken {
            access_token: "old".into(),
            refresh_token: None,
            expires_at: 0,
        }
        .save(&dir.path().join("token.json"))
        .unwrap();

        assert!(matches!(
            auth.access_token().await,
            Err(SheetsError::AuthRequired { .. })
        ));
    }
}
