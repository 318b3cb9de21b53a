use async_trait::async_trait;
use scraper::Html;
use wordtape_config::lookup::LookupConfig;
use wordtape_translator::{Lookup, LookupError, PrimaryEntry, PrimarySource, ProviderMetadata};

use crate::client::{self, fetch_page, first_match, inner_text, term_url};

const NAME: &str = "wooordhunt";

/// Dictionary site with British transcription and a short translation
#[derive(Clone)]
pub struct WooordhuntSource {
    client: reqwest::Client,
    base_url: String,
}

impl WooordhuntSource {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn from_config(config: &LookupConfig) -> Self {
        Self::new(client::build_client(config), config.primary_url.clone())
    }

    pub fn url_for(&self, term: &str) -> String {
        term_url(&self.base_url, "word", term)
    }
}

#[async_trait]
impl PrimarySource for WooordhuntSource {
    async fn resolve_primary(&self, term: &str) -> PrimaryEntry {
        let url = self.url_for(term);
        tracing::debug!("GET {}", url);

        let body = match fetch_page(&self.client, &url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("{NAME} request for '{}' failed: {}", term, e);
                return PrimaryEntry::empty();
            }
        };

        parse_entry(&body, term)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: NAME.to_string(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Both fields are extracted independently, one missing keeps the other
pub fn parse_entry(html: &str, term: &str) -> PrimaryEntry {
    let document = Html::parse_document(html);

    PrimaryEntry {
        spell: Lookup::degrade(extract_spell(&document), NAME, term),
        translation: Lookup::degrade(extract_translation(&document), NAME, term),
    }
}

/// First `span` inside the UK pronunciation block
fn extract_spell(document: &Html) -> Result<String, LookupError> {
    let span = first_match(document, "#uk_tr_sound > span")?
        .ok_or(LookupError::ElementMissing("#uk_tr_sound > span"))?;
    Ok(inner_text(span).trim().to_string())
}

/// First direct text node of a `span` in the content block
fn extract_translation(document: &Html) -> Result<String, LookupError> {
    let selector = client::selector("#wd_content > span")?;

    for span in document.select(&selector) {
        let text = span
            .children()
            .find_map(|child| child.value().as_text().map(|t| (**t).to_string()));

        if let Some(text) = text {
            return Ok(text.trim().to_string());
        }
    }

    Err(LookupError::ElementMissing("#wd_content > span text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div id="us_tr_sound"><span>|kæt|</span></div>
          <div id="uk_tr_sound"><span>|kæt|</span><span>ignored</span></div>
          <div id="wd_content">
            <span>кот, кошка<i>, котик</i></span>
            <span>second</span>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_full_entry() {
        let entry = parse_entry(PAGE, "cat");
        assert_eq!(entry.spell, Lookup::Found("|kæt|".to_string()));
        assert_eq!(entry.translation, Lookup::Found("кот, кошка".to_string()));
    }

    #[test]
    fn test_missing_spell_keeps_translation() {
        let page = r#"<div id="wd_content"><span>дерево</span></div>"#;
        let entry = parse_entry(page, "tree");
        assert_eq!(entry.spell, Lookup::Empty);
        assert_eq!(entry.translation, Lookup::Found("дерево".to_string()));
    }

    #[test]
    fn test_unknown_word_page_is_empty() {
        let page = "<html><body><p>Слово не найдено</p></body></html>";
        assert_eq!(parse_entry(page, "qwzx"), PrimaryEntry::empty());
    }

    #[test]
    fn test_translation_skips_span_without_text() {
        let page = r#"<div id="wd_content"><span><b>noun</b></span><span>мир</span></div>"#;
        let entry = parse_entry(page, "world");
        assert_eq!(entry.translation, Lookup::Found("мир".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades() {
        let source = WooordhuntSource::new(reqwest::Client::new(), "http://127.0.0.1:9".to_string());
        assert_eq!(source.resolve_primary("cat").await, PrimaryEntry::empty());
    }
}
