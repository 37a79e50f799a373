// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process;

use auth_demo_server::{
    api::router,
    config::AppConfig,
    logging::init_tracing,
    state::AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Tracing is configured from the config, so config errors go to stderr.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if config.admin_token.is_none() {
        info!("ADMIN_TOKEN not set; admin registration is disabled");
    }

    let state = match AppState::from_secret(&config.jwt_secret_key, config.admin_token.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to load signing key");
            process::exit(1);
        }
    };

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid bind address");
            process::exit(1);
        }
    };

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %addr, "Failed to bind listener");
            process::exit(1);
        }
    };

    info!(addr = %addr, "Auth demo server listening on http://{addr} (docs at /docs)");

    if let Err(e) = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server failed");
        process::exit(1);
    }

    info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
