use std::path::PathBuf;
use std::sync::Arc;

use kanal::AsyncSender;
use wordtape_types::AppEvent;

use crate::state::AppState;

pub mod enrich_sheet;
pub mod print_chat;

use enrich_sheet::handle_sheet_enrichment;
use print_chat::handle_chat_print;

/// Work a single run performs
#[derive(Debug, Clone)]
pub enum Job {
    /// Render a chat export as-is, no lookups
    PrintChat { export: PathBuf },
    /// Enrich the first column of a spreadsheet and render it
    EnrichSheet { link: PathBuf, full: bool },
}

/// Run `job` to completion, reporting the outcome on `app_to_display_tx`
pub async fn run_job(
    state: Arc<AppState>,
    job: Job,
    app_to_display_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("[JOB] Starting {:?}", job);

    let result = match job {
        Job::PrintChat { export } => handle_chat_print(state, export, &app_to_display_tx).await,
        Job::EnrichSheet { link, full } => {
            handle_sheet_enrichment(state, link, full, &app_to_display_tx).await
        }
    };

    match result {
        Ok(()) => {
            notify(&app_to_display_tx, AppEvent::Finished).await;
            Ok(())
        }
        Err(e) => {
            tracing::error!("[JOB] Failed: {:#}", e);
            notify(&app_to_display_tx, AppEvent::Failed(format!("{e:#}"))).await;
            Err(e)
        }
    }
}

/// Display may already be gone on shutdown, that's not the job's problem
pub(crate) async fn notify(tx: &AsyncSender<AppEvent>, event: AppEvent) {
    if let Err(e) = tx.send(event).await {
        tracing::debug!("Display channel closed: {}", e);
    }
}
