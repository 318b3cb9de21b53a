use async_trait::async_trait;
use serde::Deserialize;
use wordtape_config::Config;
use wordtape_core::TermSource;
use wordtape_core::error::SourceError;

use super::{SheetsAuth, SheetsError};

#[derive(Clone)]
pub struct SheetsClient {
    api_url: String,
    client: reqwest::Client,
    auth: SheetsAuth,
}

#[derive(Deserialize)]
struct ValueRange {
    values: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl SheetsClient {
    pub fn new(api_url: String, auth: SheetsAuth) -> Self {
        Self {
            api_url,
            client: reqwest::Client::new(),
            auth,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let auth = SheetsAuth::new(
            config.paths.credentials.clone(),
            config.paths.token.clone(),
            config.sheets.clone(),
        );
        Self::new(config.sheets.api_url.clone(), auth)
    }

    pub fn auth(&self) -> &SheetsAuth {
        &self.auth
    }

    /// First cell of every row in `range`, empty rows dropped
    pub async fn column_values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<String>, SheetsError> {
        let token = self.auth.access_token().await?;
        let url = format!(
            "{}/{}/values/{}",
            self.api_url.trim_end_matches('/'),
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(range)
        );

        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_default();
            return Err(SheetsError::ApiError(format!("HTTP {status} {message}")));
        }

        let body: ValueRange = response.json().await?;
        Ok(first_column(body))
    }
}

fn first_column(range: ValueRange) -> Vec<String> {
    range
        .values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .map(|cell| match cell {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Column of one spreadsheet as a pipeline term source
pub struct SpreadsheetSource {
    client: SheetsClient,
    spreadsheet_id: String,
    range: String,
}

impl SpreadsheetSource {
    pub fn new(client: SheetsClient, spreadsheet_id: String, range: String) -> Self {
        Self {
            client,
            spreadsheet_id,
            range,
        }
    }
}

#[async_trait]
impl TermSource for SpreadsheetSource {
    async fn acquire(&self) -> Result<Vec<String>, SourceError> {
        let terms = self
            .client
            .column_values(&self.spreadsheet_id, &self.range)
            .await?;
        Ok(terms)
    }

    fn name(&self) -> &str {
        "spreadsheet"
    }
}
