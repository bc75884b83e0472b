use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

pub async fn create_listener(bind_address: &str) -> Result<tokio::net::TcpListener> {
    let addr: SocketAddr = tokio::net::lookup_host(bind_address)
        .await
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", bind_address, e))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Bind address '{}' resolved to nothing", bind_address))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Bound to {}", addr);
    Ok(listener)
}

#[allow(
    clippy::expect_used,
    reason = "Signal handlers are critical infrastructure, panic is appropriate on failure"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }

    info!("Graceful shutdown initiated, draining in-flight requests...");
}
