//! # folio-api — Binary Entry Point
//!
//! Loads the project catalog, starts the rate limit sweeper, and serves the
//! Axum router until Ctrl-C.

use anyhow::Context;
use clap::Parser;
use folio_api::config::Cli;
use folio_api::state::AppState;
use folio_core::Catalog;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config();
    init_tracing(config.log_json);

    let catalog = match &config.projects_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading project catalog from {}", path.display()))?,
        None => {
            tracing::warn!("no project catalog configured, /api/projects will be empty");
            Catalog::default()
        }
    };
    tracing::info!(projects = catalog.len(), "project catalog ready");
    if !config.reply_drafts {
        tracing::warn!("reply drafting disabled, /api/ai/suggest-reply will return 503");
    }

    let state = AppState::new(config.clone(), catalog);
    let sweeper = state.limiter.spawn_sweeper(config.sweep_interval);
    let app = folio_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "portfolio API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweeper.abort();
    Ok(())
}
