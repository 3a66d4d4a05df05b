use anyhow::Context;
use chainwatch::config::{initialize_config, ConfigOverrides};
use chainwatch::logging::init_logging;
use chainwatch::ui::run_ui;
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chainwatch", about = "Live terminal viewer for an append-only ledger")]
struct Cli {
    /// Base URL of the ledger service, e.g. http://127.0.0.1:5000
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Poll period in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    #[arg(long, help = "Path to config file (default: ~/.config/chainwatch/config.json)")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let overrides = ConfigOverrides::from_env()?.merge(ConfigOverrides {
        endpoint: cli.endpoint,
        poll_interval_ms: cli.interval_ms,
    });
    let config = initialize_config(cli.config.as_deref(), &overrides)
        .context("failed to load configuration")?;

    let _logger = init_logging(&config).context("failed to start logging")?;
    log::info!("chainwatch starting against {}", config.chain_url());

    run_ui().await?;

    log::info!("chainwatch shut down");
    Ok(())
}
