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

//! Read endpoints: daily mix, optimal window and health.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use fluxion_grid_core::{EnergyError, MixProvider, WindowSelector};
use fluxion_grid_types::{DailyMix, HealthResponse, Window};

use crate::config::ServerConfig;
use crate::db::Database;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<ServerConfig>,
    pub mix: MixProvider,
    pub selector: WindowSelector,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: Arc<ServerConfig>) -> Result<Self> {
        Ok(Self {
            mix: config.mix_provider()?,
            selector: config.window_selector(),
            db,
            config,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub hours: Option<String>,
}

/// Runs a store read off the async runtime, failing with `DataUnavailable`
/// once `timeout` elapses.
pub(crate) async fn run_blocking<T, F>(timeout: Duration, task: F) -> Result<T, EnergyError>
where
    F: FnOnce() -> Result<T, EnergyError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(task)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(EnergyError::DataUnavailable(format!(
            "store task failed: {join_err}"
        ))),
        Err(_) => Err(EnergyError::DataUnavailable(format!(
            "store did not answer within {}s",
            timeout.as_secs()
        ))),
    }
}

pub async fn mix_handler(State(state): State<AppState>) -> Result<Json<Vec<DailyMix>>, ApiError> {
    let now = Utc::now();
    let db = Arc::clone(&state.db);
    let provider = state.mix.clone();

    let mix = run_blocking(state.config.request_timeout(), move || {
        provider.get_mix(db.as_ref(), now)
    })
    .await?;

    info!(days = mix.len(), "Energy mix served");
    Ok(Json(mix))
}

pub async fn optimal_window_handler(
    State(state): State<AppState>,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> Result<Json<Window>, ApiError> {
    let Query(query) =
        query.map_err(|rejection| ApiError::MalformedQuery(rejection.body_text()))?;
    let raw = query.hours.unwrap_or_default();
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::UnparsableDuration(raw.clone()))?;

    let now = Utc::now();
    let db = Arc::clone(&state.db);
    let selector = state.selector.clone();

    let window = run_blocking(state.config.request_timeout(), move || {
        selector.find_optimal_window(db.as_ref(), hours, now)
    })
    .await?;

    info!(
        hours,
        start = %window.start,
        end = %window.end,
        average = window.average_clean_energy_share,
        "Optimal charging window served"
    );
    Ok(Json(window))
}

pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let db = Arc::clone(&state.db);
    let samples = run_blocking(state.config.request_timeout(), move || {
        db.sample_count()
            .map_err(|e| EnergyError::DataUnavailable(format!("{e:#}")))
    })
    .await?;

    Ok(Json(HealthResponse {
        status: "ok".to_owned(),
        samples,
    }))
}
