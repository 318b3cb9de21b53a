//! Google Sheets term source.
//!
//! A `.gsheet` link file names the spreadsheet; the first column of that
//! spreadsheet is the raw term list.

mod auth;
mod client;
mod link;

pub use auth::{ClientSecrets, SheetsAuth, StoredToken};
pub use client::{SheetsClient, SpreadsheetSource};
pub use link::{extract_spreadsheet_id, spreadsheet_id_from_link};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No spreadsheet id found in {0}")]
    InvalidLink(PathBuf),

    #[error("No client section in credentials file {0}")]
    InvalidCredentials(PathBuf),

    #[error("Authorization required, open {url} and run `wordtape auth --code <code>`")]
    AuthRequired { url: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),
}
