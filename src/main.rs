use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifeview::app::App;
use lifeview::client::GridClient;
use lifeview::config::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    let config = args.render_config().context("Invalid render settings")?;
    let server = args.server_url()?;
    info!(%server, ?config, "starting viewer");

    let client = GridClient::with_options(server, args.api, args.timeout())
        .context("Failed to build HTTP client")?;

    let mut app = App::new(client, config, args.refresh_interval());
    app.run().await
}

/// The terminal is in raw mode while the viewer runs, so logs only go to a file
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
