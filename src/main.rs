use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use feedback_api::cli::Cli;
use feedback_api::config::AppConfig;
use feedback_api::database::{DatabaseManager, Repository};
use feedback_api::router::app;
use feedback_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Secrets file is optional; variables already in the environment win
    let env_file_result = dotenvy::from_path(&cli.env_file);

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = env_file_result {
        tracing::warn!("Could not load {}: {}", cli.env_file.display(), e);
    }

    let mut config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut config);
    tracing::info!("Starting Feedback API in {:?} mode", config.environment);

    let db = DatabaseManager::connect_lazy(&config.database);
    if cli.init_schema {
        db.ensure_schema()
            .await
            .context("failed to create feedback table")?;
    }

    let bind_addr = config.bind_addr();
    let state = AppState::new(config, Arc::new(Repository::new(db.clone())));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Feedback API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
    tracing::info!("Shutdown signal received");
}
