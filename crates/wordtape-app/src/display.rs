use std::io::Write;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use wordtape_types::AppEvent;

/// Progress and completion output on stderr
pub async fn display_loop(
    app_to_display_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stderr);
    let mut stderr = std::io::stderr();

    loop {
        let event = tokio::select! {
            event = app_to_display_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
            _ = cancel.cancelled() => {
                if interactive {
                    writeln!(stderr)?;
                }
                break;
            }
        };

        let done = matches!(event, AppEvent::Finished | AppEvent::Failed(_));
        if let Some(text) = format_event(&event, interactive) {
            write!(stderr, "{text}")?;
            stderr.flush()?;
        }

        if done {
            break;
        }
    }

    Ok(())
}

/// Terminal text for an event, `None` for events with nothing to show
pub fn format_event(event: &AppEvent, interactive: bool) -> Option<String> {
    match event {
        AppEvent::Progress(progress) if interactive => Some(format!("\r{}%", progress.percent())),
        AppEvent::Progress(progress) => Some(format!("{}%\n", progress.percent())),
        AppEvent::CacheUpdated { added } => {
            let lead = if interactive { "\n" } else { "" };
            Some(format!("{lead}{added} new words resolved\n"))
        }
        AppEvent::Rendered { output, rows } => {
            Some(format!("Done: {} rows written to {}\n", rows, output.display()))
        }
        AppEvent::Failed(message) => Some(format!("Failed: {message}\n")),
        AppEvent::Finished => None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use wordtape_types::Progress;

    use super::*;

    #[test]
    fn test_interactive_progress_rewrites_line() {
        let event = AppEvent::Progress(Progress::new(1, 2));
        assert_eq!(format_event(&event, true).as_deref(), Some("\r50%"));
        assert_eq!(format_event(&event, false).as_deref(), Some("50%\n"));
    }

    #[test]
    fn test_completion_signal() {
        let event = AppEvent::Rendered {
            output: PathBuf::from("toPrint.txt"),
            rows: 2,
        };
        assert_eq!(
            format_event(&event, false).as_deref(),
            Some("Done: 2 rows written to toPrint.txt\n")
        );
        assert_eq!(format_event(&AppEvent::Finished, true), None);
    }
}
