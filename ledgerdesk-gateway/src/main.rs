// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerdesk_gateway::auth::TokenIssuer;
use ledgerdesk_gateway::config::Config;
use ledgerdesk_gateway::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config);

    tracing::info!(
        host = %config.host,
        port = config.port,
        issuer = %config.jwt_issuer,
        "starting ledgerdesk-gateway"
    );

    let state = AppState::new(
        TokenIssuer::new(config.jwt_secret.as_bytes(), config.jwt_issuer.clone()),
        config.password_hash_cost,
    );

    // Seed accounts
    if let Some(path) = &config.accounts_file {
        state.accounts.load_seed(path).await?;
    }
    if let Some((email, password)) = config.bootstrap_admin() {
        state.accounts.bootstrap_admin(email, password).await?;
    }
    if state.accounts.len().await == 0 {
        tracing::warn!("no accounts configured, nobody will be able to log in");
    }

    let app = app(state.clone());

    // Create TCP listener
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "listening for connections");

    // Run server with graceful shutdown
    let shutting_down = state.shutting_down.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("shutdown signal received, initiating graceful shutdown");

            // Mark as shutting down (readiness will return 503)
            shutting_down.store(true, Ordering::SeqCst);
        })
        .await?;

    tracing::info!("ledgerdesk-gateway stopped");
    Ok(())
}

/// Initialize tracing based on configuration.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
