// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fluxion_grid_server::api::AppState;
use fluxion_grid_server::config::ServerConfig;
use fluxion_grid_server::db::Database;
use fluxion_grid_server::{build_router, retention};

#[derive(Debug, Parser)]
#[command(name = "fluxion-grid-server")]
#[command(author, version, about = "FluxION Grid energy mix and charging window API")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(default_value = "grid_config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("fluxion_grid_server=info,fluxion_grid_core=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    info!(path = %cli.config, "Loading configuration");
    let config = Arc::new(ServerConfig::from_file(&cli.config)?);

    let db = Arc::new(Database::open(&config.database.path)?);
    info!(path = %config.database.path, "Database opened");

    retention::spawn_retention(Arc::clone(&db), config.database.sample_retention_days);

    info!(
        days = config.mix.days,
        timezone = %config.mix.timezone,
        interval_minutes = config.window.interval_minutes,
        lookahead_hours = config.window.lookahead_hours,
        ingest_enabled = config.ingest.is_some(),
        "Energy endpoints configured"
    );

    let state = AppState::new(Arc::clone(&db), Arc::clone(&config))?;
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("FluxION Grid listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
