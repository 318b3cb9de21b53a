use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use wordtape_config::lookup::LookupConfig;
use wordtape_translator::LookupError;

/// HTTP client shared by both lookup sources
pub fn build_client(config: &LookupConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build configured HTTP client, using defaults: {}", e);
            reqwest::Client::new()
        })
}

/// `{base}/{path}/{term}` with the term percent-encoded
pub fn term_url(base: &str, path: &str, term: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        path.trim_matches('/'),
        urlencoding::encode(term)
    )
}

/// Single GET, no retries
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, LookupError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(LookupError::Status(response.status().as_u16()));
    }

    Ok(response.text().await?)
}

pub(crate) fn selector(css: &str) -> Result<Selector, LookupError> {
    Selector::parse(css).map_err(|e| LookupError::InvalidSelector(format!("{css}: {e}")))
}

/// All text below an element, like a DOM `innerText`
pub(crate) fn inner_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// First element matching `css`
pub(crate) fn first_match<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, LookupError> {
    let selector = selector(css)?;
    Ok(document.select(&selector).next())
}
