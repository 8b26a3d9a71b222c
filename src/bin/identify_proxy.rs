use anyhow::Result;
use herb_trace::config::PortalConfig;
use herb_trace::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PortalConfig::from_env()?;
    let _telemetry = init_telemetry("herb-identify-proxy", config.otlp_enabled)?;
    herb_trace::services::identify::run_identify_server(config).await
}
