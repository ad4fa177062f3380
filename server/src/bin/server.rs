//! EventGate Server
//!
//! Serves the event listing, OTP and email endpoints.
//!
//! # Usage
//!
//! ```bash
//! cp .env.example .env   # optional
//! cargo run --bin server
//! ```

use eventgate_server::Config;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eventgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🎟️  Starting EventGate server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        address = %config.server.bind_address(),
        smtp = config.email.smtp.is_some(),
        redis = config.redis_url.is_some(),
        "Configuration loaded"
    );

    // Install the Prometheus recorder for GET /metrics
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(
                error = %err,
                "Failed to install Prometheus recorder, /metrics disabled"
            );
            None
        }
    };

    eventgate_server::run(config, metrics).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
