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

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod retention;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::api::AppState;

/// Builds the HTTP router. The ingestion route exists only when an
/// `[ingest]` section is configured.
pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/health", get(api::health_handler))
        .route("/api/energy/mix", get(api::mix_handler))
        .route("/api/energy/optimal-window", get(api::optimal_window_handler));

    if state.config.ingest.is_some() {
        router = router.route("/api/energy/samples", post(ingest::ingest_handler));
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}
