use flutterwave_proxy::modules::{config, logger};
use flutterwave_proxy::proxy::AxumServer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger; the guard flushes file logs on exit
    let _log_guard = logger::init_logger();

    let config = config::load_proxy_config()?;
    info!(config = ?config, "Configuration loaded");

    if config.flutterwave_secret_key.is_none() {
        warn!("{} is not set; transfer requests will fail with 500", config::ENV_SECRET_KEY);
    }
    if config.auth_token.is_none() {
        warn!("{} is not set; every caller will be rejected with 403", config::ENV_AUTH_TOKEN);
    }

    let (server, handle) = AxumServer::start(config).await?;

    shutdown_signal().await;
    info!("Shutdown signal received");

    server.stop();
    handle.await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
