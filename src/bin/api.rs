use financial_query_engine::{
    api::start_server,
    config::{init_tracing, Config},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing("info", false);

    info!("🚀 Financial Query Engine - API Server");
    info!("📍 Bind: {}", config.bind_address());

    let engine = Arc::new(config.build_engine()?);

    info!("✅ Query engine initialized");
    info!("📡 Starting API server...");

    start_server(engine, &config.bind_address()).await?;

    Ok(())
}
