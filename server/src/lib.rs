//! # EventGate Server
//!
//! Configuration loading, provider wiring and the HTTP server lifecycle.
//!
//! # Usage
//!
//! ```bash
//! # Development: console mailer, in-memory OTP store
//! cargo run --bin server
//!
//! # Production
//! SMTP_HOST=smtp.example.com SMTP_USER=... SMTP_PASSWORD=... \
//! REDIS_URL=redis://localhost:6379 cargo run --release --bin server
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod bootstrap;
pub mod config;

pub use bootstrap::{Mailer, OtpBackend, ServerState, build_state};
pub use config::{Config, ConfigError};

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

/// Build the application from `config` and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if a backend cannot be initialized or the listener
/// cannot bind.
pub async fn run(config: Config, metrics: Option<PrometheusHandle>) -> anyhow::Result<()> {
    let mut state = build_state(&config).await?;
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }
    let app = eventgate_web::build_router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
