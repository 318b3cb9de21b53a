use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use wordtape_types::EnrichedRecord;

use crate::PrintError;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(english|spell|russian)\}").expect("valid placeholder pattern"));

/// Print template split around its row line.
///
/// The first line mentioning `{english}`, `{spell}` or `{russian}` is
/// repeated once per record. Lines before it form the header, lines
/// after it the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintTemplate {
    pub header: String,
    pub row: String,
    pub footer: String,
}

impl PrintTemplate {
    /// Plain tab separated word list
    pub fn default_tape() -> Self {
        Self {
            header: String::new(),
            row: "{english}\t{spell}\t{russian}".to_string(),
            footer: String::new(),
        }
    }

    pub fn new(header: String, row: String, footer: String) -> Self {
        Self {
            header,
            row,
            footer,
        }
    }

    pub fn load(path: &Path) -> Result<Self, PrintError> {
        let source = fs::read_to_string(path).map_err(|source| PrintError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source).ok_or_else(|| PrintError::NoRowLine(path.to_path_buf()))
    }

    /// `None` when no line carries a placeholder
    pub fn parse(source: &str) -> Option<Self> {
        let lines: Vec<&str> = source.lines().collect();
        let row_at = lines
            .iter()
            .position(|line| PLACEHOLDER.is_match(line))?;

        let join = |part: &[&str]| {
            part.iter()
                .map(|line| format!("{line}\n"))
                .collect::<String>()
        };

        Some(Self {
            header: join(&lines[..row_at]),
            row: lines[row_at].to_string(),
            footer: join(&lines[row_at + 1..]),
        })
    }

    /// Format one row, values go in verbatim even if they look like placeholders
    pub fn format_row(&self, record: &EnrichedRecord) -> String {
        PLACEHOLDER
            .replace_all(&self.row, |caps: &Captures| match &caps[1] {
                "english" => record.english.as_str(),
                "spell" => record.spell.as_str(),
                _ => record.russian.as_str(),
            })
            .into_owned()
    }

    /// Header, one line per record, footer
    pub fn render(&self, records: &[EnrichedRecord]) -> String {
        let mut document = self.header.clone();
        for record in records {
            document.push_str(&self.format_row(record));
            document.push('\n');
        }
        document.push_str(&self.footer);
        document
    }
}
