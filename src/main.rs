use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;

use github_matrix_notifier::config::Settings;
use github_matrix_notifier::server::{create_app, AppState};
use github_matrix_notifier::telemetry::init_telemetry;
use github_matrix_notifier::template::registry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing; the guard flushes spans on exit
    let _telemetry = init_telemetry(&settings.logging, &settings.otel)?;
    tracing::info!(
        homeserver = %settings.matrix.homeserver,
        room_id = %settings.matrix.room_id,
        token_len = settings.matrix.access_token.len(),
        secret_present = !settings.github.webhook_secret.is_empty(),
        "Configuration loaded"
    );

    tracing::info!(
        event_types = ?registry().event_types(),
        "Template registry loaded"
    );

    // Create application state
    let state = AppState::new(settings.clone())?;

    let app = create_app(state);

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
