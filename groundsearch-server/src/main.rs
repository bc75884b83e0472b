//! Groundsearch Server
//!
//! HTTP daemon that:
//! - Answers `/api/search?q=` with a web-grounded, HTML-formatted summary and its sources
//! - Continues a stored conversation on `/api/follow-up`
//! - Optionally serves the browser client as static files
//!
//! Access via: http://localhost:5000

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod commands;
mod router;
mod scheduler;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use groundsearch_core::modules::config::load_config;
use groundsearch_core::upstream::build_http_client;
use groundsearch_core::{GeminiModel, SearchService};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Config(cmd)) => commands::handle_config_command(cmd, cli.config.as_deref()),
        Some(Commands::Serve) | None => run_server(&cli).await,
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

async fn run_server(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }

    info!("Groundsearch v{} starting...", env!("CARGO_PKG_VERSION"));

    let http = build_http_client(config.model.request_timeout_secs)
        .context("Failed to build HTTP client")?;
    let model = GeminiModel::new(http, &config.model)?;
    let service = SearchService::new(
        Arc::new(model),
        &config.session,
        Duration::from_secs(config.model.request_timeout_secs),
    );

    let sweep_every = Duration::from_secs(config.session.sweep_interval_secs);
    let bind_address = config.server.bind_address();
    let static_dir = config.server.static_dir.clone();

    let state = AppState::new(service, config);
    let sweeper = scheduler::start_session_sweeper(state.clone(), sweep_every);
    info!("Session sweeper running every {:?}", sweep_every);

    let app = router::build_router(state);
    let listener = server_utils::create_listener(&bind_address).await?;

    info!("Server listening on http://{}", bind_address);
    info!("API available at http://{}/api/", bind_address);
    match static_dir {
        Some(dir) => info!("Serving client from {}", dir),
        None => info!("Static client hosting disabled"),
    }

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}
