// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use coffee_shop_api::{
    api::router,
    config::{AuthConfig, LogFormat, ServerConfig, DEFAULT_LOG_FILTER},
    state::AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server_config = ServerConfig::from_env()?;
    init_tracing(server_config.log_format);

    let auth_config = AuthConfig::from_env()?;
    tracing::info!(
        issuer = %auth_config.issuer(),
        audience = %auth_config.audience,
        jwks_url = %auth_config.jwks_url,
        algorithms = ?auth_config.algorithms,
        "token verification configured"
    );

    let state = AppState::new(&auth_config)?;
    let app = router(state);

    let listener = TcpListener::bind(server_config.addr).await?;
    tracing::info!(
        addr = %server_config.addr,
        "Coffee Shop API listening (docs at /docs)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
