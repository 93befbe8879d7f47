//! LMS API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p lms-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use anyhow::Context;
use lms_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = format!("{e:#}"), "Server failed to start");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        store = ?config.store,
        address = %config.api.address(),
        "Configuration loaded"
    );

    lms_api::run(config).await.context("server terminated")?;

    Ok(())
}
