//! drone-pagerduty - report CI job outcomes to PagerDuty.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagerduty::EventsClient;
use plugin::{exec, Args, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.log_format);

    let client = EventsClient::with_base_url(&args.pagerduty_url)
        .context("Failed to create PagerDuty client")?;

    let timeout_secs = args.timeout_secs;
    tokio::time::timeout(Duration::from_secs(timeout_secs), exec(&client, args))
        .await
        .map_err(|_| anyhow!("plugin timed out after {timeout_secs}s"))??;

    Ok(())
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
