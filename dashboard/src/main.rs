use std::sync::Arc;

use anyhow::Context;
use common::logger::init_tracing;
use dashboard::{
    config::{self, AppConfig},
    orchestrator::Dashboard,
    render::{RenderConfig, TerminalSink},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("ticker-dashboard", config::json_logs_from_env());

    let cfg = AppConfig::from_env();
    tracing::info!(
        base_url = %cfg.endpoints.base_url,
        every_ms = cfg.sync_interval.as_millis() as u64,
        "starting ticker dashboard"
    );

    let sink = Arc::new(TerminalSink::stdout(RenderConfig::default().slots()));

    let dashboard = Dashboard::from_config(&cfg, sink).context("failed to build dashboard")?;
    dashboard.start();

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    dashboard.shutdown();

    Ok(())
}
