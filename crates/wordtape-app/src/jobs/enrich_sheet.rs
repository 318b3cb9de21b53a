use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use kanal::AsyncSender;
use wordtape_config::Config;
use wordtape_config::paths::PathsConfig;
use wordtape_core::{CacheStore, EnrichmentPipeline, TermResolver, TermSource};
use wordtape_io::sheets::spreadsheet_id_from_link;
use wordtape_io::{SheetsClient, SpreadsheetSource};
use wordtape_lang_english::{ReversoSource, WooordhuntSource, build_client};
use wordtape_types::AppEvent;

use crate::jobs::notify;
use crate::state::AppState;

pub async fn handle_sheet_enrichment(
    state: Arc<AppState>,
    link: PathBuf,
    full: bool,
    app_to_display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let config = state.config.read().await.clone();

    let spreadsheet_id = spreadsheet_id_from_link(&link)?;
    tracing::info!("Spreadsheet {} from {}", spreadsheet_id, link.display());

    let source = SpreadsheetSource::new(
        SheetsClient::from_config(&config),
        spreadsheet_id,
        config.sheets.range.clone(),
    );
    let pipeline = build_pipeline(&config);

    enrich_and_render(
        &pipeline,
        &source,
        &config.paths,
        full || config.render_full_list,
        app_to_display_tx,
    )
    .await?;

    Ok(())
}

/// Wooordhunt first, Reverso as fallback, sharing one HTTP client
pub fn build_pipeline(config: &Config) -> EnrichmentPipeline {
    let client = build_client(&config.lookup);
    let resolver = TermResolver::new(
        Arc::new(WooordhuntSource::new(
            client.clone(),
            config.lookup.primary_url.clone(),
        )),
        Arc::new(ReversoSource::new(client, config.lookup.fallback_url.clone())),
    );

    EnrichmentPipeline::new(resolver, CacheStore::new(config.paths.cache.clone()))
}

/// Enrich, then render either this run's records or the whole cache
pub async fn enrich_and_render<S>(
    pipeline: &EnrichmentPipeline,
    source: &S,
    paths: &PathsConfig,
    full: bool,
    app_to_display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<usize>
where
    S: TermSource + ?Sized,
{
    let progress_tx = app_to_display_tx.clone();
    let records = pipeline
        .enrich(source, move |progress| {
            if let Err(e) = progress_tx.try_send(AppEvent::Progress(progress)) {
                tracing::debug!("Progress dropped: {}", e);
            }
        })
        .await
        .context("Enrichment failed")?;

    notify(
        app_to_display_tx,
        AppEvent::CacheUpdated {
            added: records.len(),
        },
    )
    .await;

    let records = if full {
        pipeline.cache().load_all()
    } else {
        records
    };

    let rows = wordtape_print::render_to_file(&records, &paths.template, &paths.output)?;
    notify(
        app_to_display_tx,
        AppEvent::Rendered {
            output: paths.output.clone(),
            rows,
        },
    )
    .await;

    Ok(rows)
}
