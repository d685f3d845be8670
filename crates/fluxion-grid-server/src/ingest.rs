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

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{info, warn};

use fluxion_grid_core::EnergyError;
use fluxion_grid_types::{FuelShareSample, IngestRequest, IngestResponse};

use crate::api::{AppState, run_blocking};
use crate::error::ApiError;

fn is_percentage(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Checks a whole batch; the first offending sample rejects all of it.
pub fn validate_samples(samples: &[FuelShareSample], interval_minutes: u32) -> Result<(), String> {
    let slot_secs = i64::from(interval_minutes.max(1)) * 60;
    let mut seen = BTreeSet::new();

    for sample in samples {
        let ts = sample.timestamp;
        if !seen.insert(ts) {
            return Err(format!("timestamp {ts} appears more than once in the batch"));
        }
        if ts.timestamp_subsec_nanos() != 0 || ts.timestamp().rem_euclid(slot_secs) != 0 {
            return Err(format!(
                "timestamp {ts} is not aligned to the {interval_minutes}-minute sampling interval"
            ));
        }
        if !is_percentage(sample.clean_energy_share) {
            return Err(format!(
                "cleanEnergyShare {} at {ts} is outside 0-100",
                sample.clean_energy_share
            ));
        }
        for (fuel, share) in &sample.fuel_shares {
            if fuel.trim().is_empty() {
                return Err(format!("empty fuel type name at {ts}"));
            }
            if !is_percentage(*share) {
                return Err(format!("share {share} for '{fuel}' at {ts} is outside 0-100"));
            }
        }
    }

    Ok(())
}

/// Accepts a sample batch. The shared secret is checked before the batch is
/// decoded, so unauthenticated callers never see schema errors.
pub async fn ingest_handler(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::InvalidSample(rejection.body_text()))?;

    let secret = body.get("sharedSecret").and_then(serde_json::Value::as_str);
    let authorized = state
        .config
        .ingest
        .as_ref()
        .zip(secret)
        .is_some_and(|(ingest, secret)| ingest.shared_secret == secret);
    if !authorized {
        warn!("Sample batch rejected: invalid shared secret");
        return Err(ApiError::Unauthorized);
    }

    let request: IngestRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidSample(format!("malformed batch: {e}")))?;

    validate_samples(&request.samples, state.config.window.interval_minutes)
        .map_err(ApiError::InvalidSample)?;

    let db = Arc::clone(&state.db);
    let samples = request.samples;
    let accepted = run_blocking(state.config.request_timeout(), move || {
        db.upsert_samples(&samples)
            .map_err(|e| EnergyError::DataUnavailable(format!("{e:#}")))
    })
    .await?;

    info!(accepted, "Sample batch stored");
    Ok(Json(IngestResponse { ok: true, accepted }))
}
