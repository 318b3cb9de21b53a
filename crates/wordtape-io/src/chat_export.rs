//! Messenger chat export reader.
//!
//! Every line of the export is lower-cased and read as a CSV record whose
//! last field is the message. Messages of the form `english - русский`
//! (also `—`, `–` or `=` as separator) become notes; every other line is
//! skipped.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wordtape_core::preprocess::{DefaultPreprocessor, Preprocessor};
use wordtape_types::ChatNote;

const SEPARATORS: [&str; 4] = [" - ", " — ", " – ", "="];

pub fn read_chat_export(path: &Path) -> Result<Vec<ChatNote>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read chat export: {}", path.display()))?;

    let notes = parse_chat_export(&content);
    tracing::info!("Parsed {} notes from {}", notes.len(), path.display());
    Ok(notes)
}

pub fn parse_chat_export(content: &str) -> Vec<ChatNote> {
    let mut skipped = 0;
    let notes: Vec<ChatNote> = content
        .lines()
        .filter_map(|line| {
            let note = parse_line(line);
            if note.is_none() {
                skipped += 1;
            }
            note
        })
        .collect();

    tracing::debug!("Skipped {} lines without a word pair", skipped);
    notes
}

/// `None` for anything that isn't an English/Russian pair
pub fn parse_line(line: &str) -> Option<ChatNote> {
    let line = DefaultPreprocessor.process(line);
    if line.is_empty() {
        return None;
    }

    let message = message_field(&line);
    let (english, russian) = split_pair(&message)?;

    if !looks_english(english) {
        return None;
    }

    Some(ChatNote {
        english: english.to_string(),
        russian: russian.to_string(),
    })
}

/// Last CSV field, or the whole line when it isn't valid CSV
fn message_field(line: &str) -> String {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().last().unwrap_or(line).to_string(),
        _ => line.to_string(),
    }
}

/// Split at the earliest separator, both halves trimmed and non-empty
fn split_pair(message: &str) -> Option<(&str, &str)> {
    let (at, separator) = SEPARATORS
        .iter()
        .filter_map(|sep| message.find(sep).map(|at| (at, *sep)))
        .min_by_key(|(at, _)| *at)?;

    let english = message[..at].trim();
    let russian = message[at + separator.len()..].trim();

    if english.is_empty() || russian.is_empty() {
        return None;
    }
    Some((english, russian))
}

fn looks_english(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
        && !text.chars().any(|c| matches!(c, '\u{0400}'..='\u{04FF}'))
}
