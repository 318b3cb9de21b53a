use std::path::PathBuf;
use std::sync::Arc;

use kanal::AsyncSender;
use wordtape_types::{AppEvent, EnrichedRecord};

use crate::jobs::notify;
use crate::state::AppState;

pub async fn handle_chat_print(
    state: Arc<AppState>,
    export: PathBuf,
    app_to_display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let paths = state.config.read().await.paths.clone();

    let notes = wordtape_io::read_chat_export(&export)?;
    let records: Vec<EnrichedRecord> = notes.into_iter().map(Into::into).collect();

    let rows = wordtape_print::render_to_file(&records, &paths.template, &paths.output)?;
    notify(
        app_to_display_tx,
        AppEvent::Rendered {
            output: paths.output,
            rows,
        },
    )
    .await;

    Ok(())
}
