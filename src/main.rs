//! Herb Traceability Portal
//!
//! Serves the role dashboards, batch timeline, herb chat assistant and the
//! plant identification proxy from a single process.

use anyhow::Result;
use tracing::info;

use herb_trace::config::PortalConfig;
use herb_trace::server::run_server;
use herb_trace::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PortalConfig::from_env()?;
    let _telemetry = init_telemetry("herb-trace", config.otlp_enabled)?;

    info!(
        "Starting herb_trace v{} (chat backend: {:?})",
        env!("CARGO_PKG_VERSION"),
        config.chat_backend
    );

    run_server(config).await
}
