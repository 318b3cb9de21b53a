use async_trait::async_trait;
use scraper::Html;
use wordtape_config::lookup::LookupConfig;
use wordtape_translator::{FallbackSource, Lookup, LookupError, ProviderMetadata};

use crate::client::{self, fetch_page, first_match, inner_text, term_url};

const NAME: &str = "reverso";

/// Context translation site, used when the dictionary has no translation
#[derive(Clone)]
pub struct ReversoSource {
    client: reqwest::Client,
    base_url: String,
}

impl ReversoSource {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn from_config(config: &LookupConfig) -> Self {
        Self::new(client::build_client(config), config.fallback_url.clone())
    }

    pub fn url_for(&self, term: &str) -> String {
        term_url(&self.base_url, "translation/english-russian", term)
    }
}

#[async_trait]
impl FallbackSource for ReversoSource {
    async fn resolve_fallback(&self, term: &str) -> Lookup<String> {
        let url = self.url_for(term);
        tracing::debug!("GET {}", url);

        match fetch_page(&self.client, &url).await {
            Ok(body) => parse_translation(&body, term),
            Err(e) => {
                tracing::warn!("{NAME} request for '{}' failed: {}", term, e);
                Lookup::Empty
            }
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: NAME.to_string(),
            base_url: self.base_url.clone(),
        }
    }
}

pub fn parse_translation(html: &str, term: &str) -> Lookup<String> {
    let document = Html::parse_document(html);
    Lookup::degrade(extract_translation(&document), NAME, term)
}

/// Linked translation first, plain `div` entry otherwise
fn extract_translation(document: &Html) -> Result<String, LookupError> {
    let element = match first_match(document, "#translations-content > a")? {
        Some(element) => element,
        None => first_match(document, "#translations-content > div")?
            .ok_or(LookupError::ElementMissing("#translations-content"))?,
    };

    Ok(strip_leading_blank(&inner_text(element)).to_string())
}

/// Drops the run of spaces and newlines the site puts before the text
pub fn strip_leading_blank(text: &str) -> &str {
    text.trim_start_matches([' ', '\n'])
}
