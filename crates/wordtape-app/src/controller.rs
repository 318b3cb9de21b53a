use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wordtape_types::AppEvent;

use crate::display::display_loop;
use crate::jobs::{Job, run_job};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_display: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            // Progress is pushed from a sync callback with try_send
            app_to_display: kanal::unbounded_async(),
        }
    }
}

/// Runs one job in the background while the display follows its events
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, job: Job) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(run_job(
            self.state.clone(),
            job,
            self.channels.app_to_display.0.clone(),
        ));

        tasks.spawn(display_loop(
            self.channels.app_to_display.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Stops the display; a running job ends with the process
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
