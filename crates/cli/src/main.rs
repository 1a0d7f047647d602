//! `dispatch-trigger` entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Wire observability**: `tracing-subscriber` with a JSON layer and, when
//!    configured, an OpenTelemetry OTLP exporter. See [`telemetry`].
//! 2. **Load settings**: token, API base URL and listen address from the
//!    environment. See [`settings`].
//! 3. **Construct infrastructure**: a [`GitHubDispatchClient`] injected into a
//!    [`TriggerHandler`], mounted on the [`listener`] router.
//! 4. **Serve** until Ctrl-C or SIGTERM, then shut down gracefully.

mod settings;
mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use github::GitHubDispatchClient;
use trigger::TriggerHandler;

use crate::settings::{Settings, TOKEN_VAR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let telemetry = telemetry::init()?;
    let result = run().await;
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "dispatch trigger exited with an error");
    }
    telemetry.shutdown();
    result
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("invalid configuration")?;
    let client = GitHubDispatchClient::new()?;
    let handler =
        TriggerHandler::new(client, settings.token.clone()).with_api_base(&settings.api_base);
    if !handler.has_token() {
        tracing::warn!(
            var = TOKEN_VAR,
            "dispatch token is not set; every trigger will answer 500"
        );
    }
    let target = handler.target().clone();
    let app = listener::router(Arc::new(handler));

    let tcp = tokio::net::TcpListener::bind(settings.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.listen_addr))?;
    tracing::info!(
        addr = %tcp.local_addr()?,
        path = listener::TRIGGER_PATH,
        owner = %target.owner,
        repo = %target.repository,
        event_type = %target.event_type,
        api_base = %settings.api_base,
        "dispatch trigger listening"
    );

    axum::serve(tcp, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("dispatch trigger stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
