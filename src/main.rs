use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use budget_panel::{cli, config::Config};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::from_env();
    init_logging(&config)?;

    tracing::info!(local = config.is_local(), "starting budget panel");
    let result = cli::run(&config).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "budget panel exited with error");
    }
    result
}

/// Logs go to a file: stdout belongs to the terminal UI.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("cannot open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
