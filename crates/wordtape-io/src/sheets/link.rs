use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::SheetsError;

// `doc_id`, four characters of `": "`, then the id up to the next quote
static DOC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"doc_id.{4}(.*?)""#).expect("valid doc_id pattern"));

pub fn extract_spreadsheet_id(line: &str) -> Option<String> {
    DOC_ID
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
}

/// Spreadsheet id from the first line of a link file
pub fn spreadsheet_id_from_link(path: &Path) -> Result<String, SheetsError> {
    let io_err = |source: std::io::Error| SheetsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line).map_err(io_err)?;

    extract_spreadsheet_id(&first_line).ok_or_else(|| SheetsError::InvalidLink(path.to_path_buf()))
}
