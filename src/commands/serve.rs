use anyhow::{Context, Result};

use hashpulse::config::Config;
use hashpulse::server::AnalyticsServer;

use super::open_service;

/// Start the API server and run until Ctrl+C
pub async fn serve(config: Config) -> Result<()> {
    if let Err(e) = hashpulse::metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed; continuing without metrics");
    }

    let service = open_service(&config)?;
    let server = AnalyticsServer::new(config.server.clone(), service)
        .context("Failed to create API server")?;

    println!("{}", server.info().display());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        tracing::info!("Shutdown signal received");
    };

    server
        .start_with_shutdown(shutdown)
        .await
        .context("API server failed")?;
    Ok(())
}
