use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use wordtape_io::SheetsClient;

pub mod controller;
pub mod display;
pub mod jobs;
pub mod profile;
pub mod state;


use self::controller::AppController;
use self::jobs::Job;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "wordtape", about = "English-Russian word list builder for printable word tapes")]
struct Cli {
    /// JSON profile
    #[arg(long, default_value = "wordtape.json")]
    config: PathBuf,
    /// Log level, RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the word pairs found in a messenger chat export (CSV)
    Chat { export: PathBuf },
    /// Look up the terms of a shared spreadsheet and print them
    Sheet {
        /// `.gsheet` link file
        link: PathBuf,
        /// Print every cached word, not only this run's
        #[arg(long)]
        full: bool,
    },
    /// Exchange a consent code for a spreadsheet access token
    Auth {
        #[arg(long)]
        code: String,
    },
    /// Write the default profile and print template
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let job = match cli.command {
        Command::InitConfig => {
            profile::init_profile(&cli.config)?;
            return Ok(());
        }
        Command::Auth { code } => {
            let config = profile::load_profile(&cli.config)?;
            let client = SheetsClient::from_config(&config);
            client
                .auth()
                .exchange_code(&code)
                .await
                .context("Authorization failed")?;
            println!("Token saved to {}", config.paths.token.display());
            return Ok(());
        }
        Command::Chat { export } => Job::PrintChat { export },
        Command::Sheet { link, full } => Job::EnrichSheet { link, full },
    };

    let config = profile::load_profile(&cli.config)?;
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(job);

    // Display stops on Finished/Failed, so both tasks always drain
    let run = async {
        let mut first_error = None;
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result.context("task panicked").and_then(|r| r) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    };

    tokio::select! {
        result = run => result,
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
            anyhow::bail!("Interrupted")
        }
    }
}
